//! Session state handed to providers by the gateway.
//!
//! The gateway creates, persists, and refreshes [`SessionState`] values. Providers only
//! read them; nothing in this crate mutates a session after it was passed in.

pub mod secret;

pub use secret::*;

// self
use crate::_prelude::*;

/// Credentials and identity claims for one authenticated user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
	/// Bearer credential presented to protected endpoints.
	pub access_token: Option<TokenSecret>,
	/// OpenID Connect ID token, when the exchange returned one.
	pub id_token: Option<TokenSecret>,
	/// Refresh credential, when the exchange returned one.
	pub refresh_token: Option<TokenSecret>,
	/// Instant the session was created.
	pub created_at: Option<OffsetDateTime>,
	/// Instant the access token expires.
	pub expires_on: Option<OffsetDateTime>,
	/// Resolved email identity.
	pub email: Option<String>,
	/// Provider-side user identifier.
	pub user: Option<String>,
	/// Preferred username claim.
	pub preferred_username: Option<String>,
}
impl SessionState {
	/// Creates a session carrying only an access token.
	pub fn with_access_token(token: impl Into<TokenSecret>) -> Self {
		Self { access_token: Some(token.into()), ..Default::default() }
	}

	/// Returns the access token, treating an empty value the same as an absent one.
	pub fn access_token(&self) -> Option<&str> {
		self.access_token.as_ref().filter(|token| !token.is_empty()).map(TokenSecret::expose)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_access_token_reads_as_absent() {
		assert_eq!(SessionState::default().access_token(), None);
		assert_eq!(SessionState::with_access_token("").access_token(), None);
		assert_eq!(SessionState::with_access_token("abc").access_token(), Some("abc"));
	}

	#[test]
	fn partial_session_deserializes_with_defaults() {
		let session: SessionState =
			serde_json::from_str(r#"{"access_token":"abc","email":"user@example.com"}"#)
				.expect("Partial session should deserialize.");

		assert_eq!(session.access_token(), Some("abc"));
		assert_eq!(session.email.as_deref(), Some("user@example.com"));
		assert!(session.created_at.is_none());
		assert!(session.refresh_token.is_none());
	}

	#[test]
	fn debug_output_redacts_tokens() {
		let session = SessionState::with_access_token("very-secret-token");

		assert!(!format!("{session:?}").contains("very-secret-token"));
	}
}
