//! Header sets attached to authenticated provider requests.

// crates.io
use ::http::{
	HeaderMap, HeaderName, HeaderValue,
	header::{ACCEPT, AUTHORIZATION},
};
// self
use crate::{_prelude::*, error::ConfigError};

/// `Accept` value used for JSON endpoints.
pub const ACCEPT_APPLICATION_JSON: &str = "application/json";

/// Signature of a provider's header builder.
pub type HeaderBuilderFn = fn(&str) -> AuthHeaders;

/// Token types understood by [`make_authorization_header`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
	/// RFC 6750 bearer token.
	Bearer,
}
impl TokenType {
	/// Returns the scheme prefix used in the `Authorization` header.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenType::Bearer => "Bearer",
		}
	}
}
impl Display for TokenType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered header name/value pairs for one authenticated request.
///
/// Building the set never fails. Values are only checked when the set is converted into
/// an [`HeaderMap`], so a credential that cannot be encoded surfaces as a request error
/// rather than a panic. `Debug` output redacts the `Authorization` value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders(Vec<(HeaderName, String)>);
impl AuthHeaders {
	/// Appends a header, replacing any earlier value with the same name.
	pub fn insert(&mut self, name: HeaderName, value: impl Into<String>) {
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.0.push((name, value)),
		}
	}

	/// Returns the value for `name`, if present.
	pub fn get(&self, name: &HeaderName) -> Option<&str> {
		self.0.iter().find(|(existing, _)| existing == name).map(|(_, value)| value.as_str())
	}

	/// Iterates the pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &str)> {
		self.0.iter().map(|(name, value)| (name, value.as_str()))
	}

	/// Number of headers in the set.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the set has no headers.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Converts the set into a [`HeaderMap`]; the `Authorization` value is marked sensitive.
	pub fn to_header_map(&self) -> Result<HeaderMap, ConfigError> {
		let mut map = HeaderMap::with_capacity(self.0.len());

		for (name, value) in &self.0 {
			let mut header = HeaderValue::from_str(value)
				.map_err(|_| ConfigError::InvalidHeaderValue { name: name.to_string() })?;

			if name == AUTHORIZATION {
				header.set_sensitive(true);
			}

			map.insert(name.clone(), header);
		}

		Ok(map)
	}
}
impl Debug for AuthHeaders {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut list = f.debug_map();

		for (name, value) in &self.0 {
			if name == AUTHORIZATION {
				list.entry(&name.as_str(), &"<redacted>");
			} else {
				list.entry(&name.as_str(), value);
			}
		}

		list.finish()
	}
}

/// Builds `Accept: application/json` + `Authorization: <type> <token>` plus `extra` headers.
///
/// `extra` may override `Accept`; the `Authorization` entry is always written last.
pub fn make_authorization_header(
	token_type: TokenType,
	token: &str,
	extra: &[(HeaderName, &str)],
) -> AuthHeaders {
	let mut headers = AuthHeaders::default();

	headers.insert(ACCEPT, ACCEPT_APPLICATION_JSON);

	for (name, value) in extra {
		headers.insert(name.clone(), *value);
	}

	headers.insert(AUTHORIZATION, format!("{token_type} {token}"));

	headers
}

/// Default builder for providers without extra header requirements.
pub fn make_bearer_header(token: &str) -> AuthHeaders {
	make_authorization_header(TokenType::Bearer, token, &[])
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bearer_header_has_accept_and_authorization() {
		let headers = make_bearer_header("abc");

		assert_eq!(headers.len(), 2);
		assert_eq!(headers.get(&ACCEPT), Some(ACCEPT_APPLICATION_JSON));
		assert_eq!(headers.get(&AUTHORIZATION), Some("Bearer abc"));
	}

	#[test]
	fn extra_headers_keep_insertion_order_and_replace_duplicates() {
		let marker = HeaderName::from_static("x-format");
		let headers = make_authorization_header(
			TokenType::Bearer,
			"abc",
			&[(marker.clone(), "json"), (ACCEPT, "text/plain")],
		);
		let names = headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();

		assert_eq!(names, ["accept", "x-format", "authorization"]);
		assert_eq!(headers.get(&ACCEPT), Some("text/plain"));
	}

	#[test]
	fn header_map_marks_authorization_sensitive() {
		let map = make_bearer_header("abc").to_header_map().expect("Plain token should encode.");
		let auth = map.get(AUTHORIZATION).expect("Authorization header should be present.");

		assert!(auth.is_sensitive());
		assert_eq!(auth, "Bearer abc");
	}

	#[test]
	fn unencodable_token_fails_at_conversion() {
		let headers = make_bearer_header("bad\ntoken");
		let err = headers.to_header_map().expect_err("Newlines cannot be sent in headers.");

		assert!(matches!(
			err,
			ConfigError::InvalidHeaderValue { ref name } if name == "authorization"
		));
	}

	#[test]
	fn debug_redacts_authorization() {
		let rendered = format!("{:?}", make_bearer_header("very-secret"));

		assert!(!rendered.contains("very-secret"));
		assert!(rendered.contains("<redacted>"));
	}
}
