//! Optional observability helpers for provider calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each call in an `oauth2_gateway.provider` span with `provider`
//!   and `call` fields, and to emit a warning event when session validation fails.
//! - Enable `metrics` to increment the `oauth2_gateway_provider_call_total` counter for every
//!   attempt/success/failure, labeled by `provider` + `call` + `outcome`.
//!
//! Access tokens never reach a span, event, or label.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Provider operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderCall {
	/// Email lookup against the profile endpoint.
	EmailAddress,
	/// Token liveness check against the validate endpoint.
	ValidateSession,
}
impl ProviderCall {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderCall::EmailAddress => "email_address",
			ProviderCall::ValidateSession => "validate_session",
		}
	}
}
impl Display for ProviderCall {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a provider call.
	Attempt,
	/// Successful completion (a valid session, for validation).
	Success,
	/// Error returned to the caller (an invalid session, for validation).
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
