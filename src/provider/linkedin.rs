//! LinkedIn "Sign In with LinkedIn using OpenID Connect" provider.
//!
//! LinkedIn's API expects an `x-li-format: json` marker on every authenticated request in
//! addition to the bearer token, so the variant installs its own header builder. The
//! userinfo endpoint doubles as the validate endpoint; both stay separately configurable.

// crates.io
use ::http::HeaderName;
// self
use crate::{
	_prelude::*,
	context::RequestContext,
	http::{ProviderHttpClient, ProviderRequest},
	obs::{self, CallOutcome, CallSpan, ProviderCall},
	provider::{
		AuthHeaders, Provider, ProviderData, ProviderDefaults, ProviderFuture, TokenType,
		make_authorization_header, string_field, validate_token,
	},
	session::SessionState,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Format marker header LinkedIn requires on authenticated API calls.
pub const LINKEDIN_FORMAT_HEADER: &str = "x-li-format";

/// Builds LinkedIn's header set: `Accept`, `x-li-format`, and `Authorization: Bearer`.
pub fn make_linkedin_header(access_token: &str) -> AuthHeaders {
	let format_marker = HeaderName::from_static(LINKEDIN_FORMAT_HEADER);

	make_authorization_header(TokenType::Bearer, access_token, &[(format_marker, "json")])
}

/// LinkedIn provider variant.
#[derive(Clone)]
pub struct LinkedInProvider {
	data: ProviderData,
	http_client: Arc<dyn ProviderHttpClient>,
}
impl LinkedInProvider {
	/// LinkedIn's default endpoints and scope.
	pub const DEFAULTS: ProviderDefaults = ProviderDefaults {
		name: "LinkedIn",
		login_url: "https://www.linkedin.com/oauth/v2/authorization",
		redeem_url: "https://www.linkedin.com/oauth2/v2/accessToken",
		profile_url: "https://api.linkedin.com/v2/userinfo",
		validate_url: "https://api.linkedin.com/v2/userinfo",
		scope: "openid email profile",
	};

	/// Applies LinkedIn defaults to `data` and binds the provider to `http_client`.
	pub fn with_http_client(
		mut data: ProviderData,
		http_client: Arc<dyn ProviderHttpClient>,
	) -> Self {
		data.set_provider_defaults(&Self::DEFAULTS);
		data.set_authorization_header(make_linkedin_header);

		Self { data, http_client }
	}

	async fn fetch_email(&self, ctx: &RequestContext, session: &SessionState) -> Result<String> {
		let access_token = session.access_token().ok_or(Error::MissingCredential)?;
		let profile_url = self.data.require_profile_url()?.clone();
		let headers = make_linkedin_header(access_token);
		let document = ProviderRequest::get(profile_url)
			.with_context(ctx)
			.with_headers(&headers)
			.send(self.http_client.as_ref())
			.await?
			.into_json()?;

		string_field(&document, "email")
	}
}
#[cfg(feature = "reqwest")]
impl LinkedInProvider {
	/// Creates a provider backed by the crate's default reqwest transport.
	pub fn new(data: ProviderData) -> Self {
		Self::with_http_client(data, Arc::new(ReqwestHttpClient::default()))
	}
}
impl Provider for LinkedInProvider {
	fn data(&self) -> &ProviderData {
		&self.data
	}

	fn authorization_header(&self, access_token: &str) -> AuthHeaders {
		make_linkedin_header(access_token)
	}

	fn email_address<'a>(
		&'a self,
		ctx: &'a RequestContext,
		session: &'a SessionState,
	) -> ProviderFuture<'a, Result<String>> {
		let provider = self.data.name();
		let span = CallSpan::new(provider, ProviderCall::EmailAddress);

		Box::pin(span.instrument(async move {
			obs::record_call_outcome(provider, ProviderCall::EmailAddress, CallOutcome::Attempt);

			let result = self.fetch_email(ctx, session).await;
			let outcome = if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure };

			obs::record_call_outcome(provider, ProviderCall::EmailAddress, outcome);

			result
		}))
	}

	fn validate_session<'a>(
		&'a self,
		ctx: &'a RequestContext,
		session: &'a SessionState,
	) -> ProviderFuture<'a, bool> {
		Box::pin(async move {
			let access_token = session.access_token().unwrap_or_default();
			let headers = make_linkedin_header(access_token);

			validate_token(ctx, self.http_client.as_ref(), &self.data, access_token, &headers).await
		})
	}
}
impl Debug for LinkedInProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LinkedInProvider").field("data", &self.data).finish_non_exhaustive()
	}
}
