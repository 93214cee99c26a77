//! Request executor for authenticated provider calls.
//!
//! [`ProviderHttpClient`] is the crate's only dependency on an HTTP stack. Providers build
//! a [`ProviderRequest`], attach a [`RequestContext`] and an [`AuthHeaders`] set, and
//! receive a [`ProviderResponse`] whose status and JSON decoding are checked separately so
//! transport failures, non-2xx answers, and malformed bodies stay distinguishable.

// crates.io
use ::http::{Method, Request, Response, StatusCode};
// self
use crate::{
	_prelude::*,
	context::RequestContext,
	error::{ConfigError, ParseError, RequestError},
	provider::AuthHeaders,
};
#[cfg(feature = "reqwest")] use crate::error::TransportError;

/// Outbound request handed to a [`ProviderHttpClient`].
pub type HttpRequest = Request<Vec<u8>>;
/// Raw response returned by a [`ProviderHttpClient`].
pub type HttpResponse = Response<Vec<u8>>;
/// Boxed future returned by transports.
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute provider requests.
///
/// Implementations must report network failures as [`Error::Transport`] and return every
/// HTTP answer, including non-2xx ones, as `Ok` so callers decide how to treat the status.
/// Cancellation is applied by the caller's [`RequestContext`], which drops the returned
/// future; implementations do not need to observe the context themselves.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and buffers the full response body.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse>;
}

/// Builder for a single authenticated provider call.
#[derive(Clone, Debug)]
pub struct ProviderRequest<'a> {
	url: Url,
	headers: Option<&'a AuthHeaders>,
	context: Option<&'a RequestContext>,
}
impl<'a> ProviderRequest<'a> {
	/// Starts a `GET` request to `url`.
	pub fn get(url: Url) -> Self {
		Self { url, headers: None, context: None }
	}

	/// Runs the call under `ctx`; without one, a background context is used.
	pub fn with_context(mut self, ctx: &'a RequestContext) -> Self {
		self.context = Some(ctx);

		self
	}

	/// Attaches the headers sent with the request.
	pub fn with_headers(mut self, headers: &'a AuthHeaders) -> Self {
		self.headers = Some(headers);

		self
	}

	/// Target URL.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Builds the transport-level request.
	pub fn to_http_request(&self) -> Result<HttpRequest> {
		let mut request = Request::builder()
			.method(Method::GET)
			.uri(self.url.as_str())
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		if let Some(headers) = self.headers {
			*request.headers_mut() = headers.to_header_map()?;
		}

		Ok(request)
	}

	/// Executes the request through `client`, honoring the attached context.
	pub async fn send(self, client: &dyn ProviderHttpClient) -> Result<ProviderResponse> {
		let request = self.to_http_request()?;
		let ctx = self.context.cloned().unwrap_or_default();
		let response = ctx.run(client.execute(request)).await?;

		Ok(ProviderResponse::from(response))
	}
}

/// Buffered provider response.
#[derive(Clone, Debug)]
pub struct ProviderResponse {
	status: StatusCode,
	body: Vec<u8>,
}
impl ProviderResponse {
	/// Creates a response from a status and body.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// HTTP status code.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Returns true for any 2xx status.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Raw body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Fails with [`Error::Request`] unless the status is 2xx.
	pub fn error_for_status(self) -> Result<Self> {
		if self.is_success() {
			Ok(self)
		} else {
			Err(RequestError::new(self.status.as_u16(), &self.body).into())
		}
	}

	/// Decodes the body as a JSON document.
	pub fn json(&self) -> Result<JsonValue> {
		let status = self.status.as_u16();
		let mut de = serde_json::Deserializer::from_slice(&self.body);
		let value = serde_path_to_error::deserialize(&mut de)
			.map_err(|err| ParseError::tracked(status, err))?;

		de.end().map_err(|source| ParseError { source, path: ".".into(), status })?;

		Ok(value)
	}

	/// Checks the status, then decodes the body as JSON.
	pub fn into_json(self) -> Result<JsonValue> {
		self.error_for_status()?.json()
	}
}
impl From<HttpResponse> for ProviderResponse {
	fn from(response: HttpResponse) -> Self {
		let status = response.status();

		Self { status, body: response.into_body() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse> {
		let client = self.0.clone();

		Box::pin(async move {
			let request =
				reqwest::Request::try_from(request).map_err(ConfigError::request_conversion)?;
			let response = client.execute(request).await.map_err(TransportError::from)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(TransportError::from)?;
			let mut response_new = HttpResponse::new(body.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
