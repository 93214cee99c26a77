//! Gateway-provider error types shared across providers, transports, and contexts.

// self
use crate::_prelude::*;

/// Provider-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by provider APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Upstream answered with a non-success status.
	#[error(transparent)]
	Request(#[from] RequestError),
	/// Upstream body could not be decoded as JSON.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// Session carries no access token.
	#[error("Session is missing an access token.")]
	MissingCredential,
	/// A required response field was absent or had the wrong type.
	#[error("Response field `{field}` is {issue}.")]
	FieldExtraction {
		/// JSON field name that was requested.
		field: &'static str,
		/// What was wrong with the field.
		issue: FieldIssue,
	},
	/// Caller cancelled the request context before the call completed.
	#[error("Request was cancelled by the caller.")]
	Cancelled,
	/// Request context timeout elapsed before the call completed.
	#[error("Request deadline exceeded.")]
	DeadlineExceeded,
}
impl Error {
	/// Returns true for the cancellation-class variants.
	pub fn is_cancellation(&self) -> bool {
		matches!(self, Self::Cancelled | Self::DeadlineExceeded)
	}
}

/// Reason attached to [`Error::FieldExtraction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldIssue {
	/// Field is absent (or the body is not a JSON object).
	Missing,
	/// Field exists but is not a JSON string.
	NotAString,
}
impl Display for FieldIssue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Missing => f.write_str("missing"),
			Self::NotAString => f.write_str("not a string"),
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Transport could not adopt the built request (e.g., the URI is not absolute).
	#[error("Request could not be converted for the HTTP transport.")]
	RequestConversion {
		/// Transport-specific conversion failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// A header value cannot be encoded (e.g., a token with control characters).
	#[error("Header `{name}` has a value that cannot be sent.")]
	InvalidHeaderValue {
		/// Header name whose value was rejected.
		name: String,
	},
	/// Configured endpoint cannot be parsed.
	#[error("The {endpoint} URL is invalid.")]
	InvalidUrl {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Configured endpoint is not an absolute http(s) URL.
	#[error("The {endpoint} URL must be an absolute http(s) URL: {url}.")]
	UnsupportedEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Provider has no URL configured for the requested endpoint.
	#[error("Provider `{provider}` has no {endpoint} URL configured.")]
	MissingEndpoint {
		/// Provider display name.
		provider: String,
		/// Missing endpoint label.
		endpoint: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's request-conversion failure inside [`ConfigError`].
	pub fn request_conversion(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::RequestConversion { source: Box::new(src) }
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-2xx answer from a provider endpoint.
#[derive(Debug, ThisError)]
#[error("Provider endpoint returned HTTP {status}.")]
pub struct RequestError {
	/// HTTP status code.
	pub status: u16,
	/// Truncated response body, when the body was valid UTF-8.
	pub body_preview: Option<String>,
}
impl RequestError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Builds an error for `status`, keeping a bounded preview of `body`.
	pub fn new(status: u16, body: &[u8]) -> Self {
		let body_preview = std::str::from_utf8(body)
			.ok()
			.filter(|text| !text.trim().is_empty())
			.map(truncate_preview);

		Self { status, body_preview }
	}
}

/// Malformed JSON in a provider response.
#[derive(Debug, ThisError)]
#[error("Provider endpoint returned malformed JSON at `{path}`.")]
pub struct ParseError {
	/// Structured parsing failure.
	#[source]
	pub source: serde_json::Error,
	/// Path into the document where decoding stopped.
	pub path: String,
	/// HTTP status code of the response that failed to parse.
	pub status: u16,
}
impl ParseError {
	/// Captures the failing path from a path-tracking decode error.
	pub fn tracked(status: u16, err: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = err.path().to_string();

		Self { source: err.into_inner(), path, status }
	}
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= RequestError::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(RequestError::BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_error_truncates_long_bodies() {
		let body = "x".repeat(400);
		let err = RequestError::new(500, body.as_bytes());
		let preview = err.body_preview.expect("Preview should exist for UTF-8 bodies.");

		assert_eq!(preview.chars().count(), RequestError::BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
	}

	#[test]
	fn request_error_skips_blank_and_binary_bodies() {
		assert!(RequestError::new(401, b"  ").body_preview.is_none());
		assert!(RequestError::new(401, &[0xff, 0xfe]).body_preview.is_none());
		assert_eq!(
			RequestError::new(401, b"unauthorized").body_preview.as_deref(),
			Some("unauthorized")
		);
	}

	#[test]
	fn cancellation_class_is_detected() {
		assert!(Error::Cancelled.is_cancellation());
		assert!(Error::DeadlineExceeded.is_cancellation());
		assert!(!Error::MissingCredential.is_cancellation());
	}

	#[test]
	fn field_extraction_message_names_the_field() {
		let err = Error::FieldExtraction { field: "email", issue: FieldIssue::NotAString };

		assert_eq!(err.to_string(), "Response field `email` is not a string.");
	}
}
