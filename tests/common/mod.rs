#![allow(dead_code)]

// std
use std::{
	io::{Error as IoError, ErrorKind},
	sync::Arc,
};
// crates.io
use http::{HeaderMap, Method, StatusCode};
use parking_lot::Mutex;
// self
use oauth2_gateway_providers::{
	error::TransportError,
	http::{HttpFuture, HttpRequest, HttpResponse, ProviderHttpClient},
};

/// Scripted answer returned for every request.
#[derive(Clone, Debug)]
pub enum MockReply {
	/// HTTP answer with the given status and body.
	Response { status: u16, body: String },
	/// Connection-level failure.
	TransportFailure,
	/// Never resolves; used to exercise cancellation.
	Hang,
}
impl MockReply {
	pub fn json(status: u16, body: &str) -> Self {
		Self::Response { status, body: body.to_owned() }
	}
}

/// Request captured by [`MockHttpClient`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub uri: String,
	pub headers: HeaderMap,
}

/// Recording transport double.
#[derive(Clone, Debug)]
pub struct MockHttpClient {
	reply: MockReply,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}
impl MockHttpClient {
	pub fn replying(reply: MockReply) -> Self {
		Self { reply, requests: Default::default() }
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}

	pub fn last_request(&self) -> RecordedRequest {
		self.requests.lock().last().cloned().expect("Mock transport should have been called.")
	}
}
impl ProviderHttpClient for MockHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, HttpResponse> {
		self.requests.lock().push(RecordedRequest {
			method: request.method().clone(),
			uri: request.uri().to_string(),
			headers: request.headers().clone(),
		});

		let reply = self.reply.clone();

		Box::pin(async move {
			match reply {
				MockReply::Response { status, body } => {
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Mock status should be valid.");

					Ok(response)
				},
				MockReply::TransportFailure => Err(TransportError::network(IoError::new(
					ErrorKind::ConnectionRefused,
					"mock connection refused",
				))
				.into()),
				MockReply::Hang => std::future::pending().await,
			}
		})
	}
}
