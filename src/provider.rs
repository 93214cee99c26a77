//! Provider capability trait (behavior) and the shared records it is built from (data).
//!
//! `data` holds [`ProviderData`], the endpoint/scope record every variant composes, along
//! with the serializable [`ProviderConfig`] overrides. `defaults` declares the per-variant
//! [`ProviderDefaults`] value object. `headers` builds the header sets sent to protected
//! endpoints. Variants such as [`LinkedInProvider`] pair those pieces with their own
//! header builder and claim extraction behind the [`Provider`] trait.

pub mod data;
pub mod defaults;
pub mod headers;
pub mod linkedin;

mod validate;

pub use data::*;
pub use defaults::*;
pub use headers::*;
pub use linkedin::*;
pub use validate::*;

// self
use crate::{
	_prelude::*,
	context::RequestContext,
	error::FieldIssue,
	session::SessionState,
};

/// Boxed future returned by provider calls.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// Capability set the gateway consumes from every provider variant.
///
/// Construction applies the variant's defaults (set-if-absent) and installs its header
/// builder. After that a provider holds no mutable state, so a single instance can serve
/// concurrent calls for independent sessions.
///
/// [`email_address`](Provider::email_address) reports every failure as a typed error,
/// while [`validate_session`](Provider::validate_session) only answers yes or no; gateways
/// use the latter on hot paths where the reason would not change their decision.
pub trait Provider
where
	Self: Send + Sync,
{
	/// Endpoint and scope record backing this provider.
	fn data(&self) -> &ProviderData;

	/// Header set attached to authenticated requests for `access_token`.
	fn authorization_header(&self, access_token: &str) -> AuthHeaders {
		self.data().authorization_header(access_token)
	}

	/// Resolves the email address of the session's user.
	fn email_address<'a>(
		&'a self,
		ctx: &'a RequestContext,
		session: &'a SessionState,
	) -> ProviderFuture<'a, Result<String>>;

	/// Returns true only if the session's access token is accepted by the validate endpoint.
	fn validate_session<'a>(
		&'a self,
		ctx: &'a RequestContext,
		session: &'a SessionState,
	) -> ProviderFuture<'a, bool>;
}

/// Extracts the string value of `field` from a JSON object.
pub fn string_field(document: &JsonValue, field: &'static str) -> Result<String> {
	match document.get(field) {
		Some(JsonValue::String(value)) => Ok(value.clone()),
		Some(_) => Err(Error::FieldExtraction { field, issue: FieldIssue::NotAString }),
		None => Err(Error::FieldExtraction { field, issue: FieldIssue::Missing }),
	}
}
