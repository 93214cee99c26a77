// self
use crate::{
	_prelude::*,
	context::RequestContext,
	error::ConfigError,
	http::{ProviderHttpClient, ProviderRequest},
	obs::{self, CallOutcome, CallSpan, ProviderCall},
	provider::{AuthHeaders, ProviderData},
};

/// Checks `access_token` against the provider's validate endpoint.
///
/// Returns true iff the endpoint answers with a 2xx status. An empty token or a missing
/// validate URL yields false without any network I/O. When `headers` is empty the token
/// is sent as an `access_token` query parameter instead. Every failure (transport,
/// status, cancellation, request construction) is logged and collapsed into false.
pub async fn validate_token(
	ctx: &RequestContext,
	client: &dyn ProviderHttpClient,
	data: &ProviderData,
	access_token: &str,
	headers: &AuthHeaders,
) -> bool {
	let provider = data.name();
	let span = CallSpan::new(provider, ProviderCall::ValidateSession);

	span.instrument(async {
		obs::record_call_outcome(provider, ProviderCall::ValidateSession, CallOutcome::Attempt);

		let valid = match check_token(ctx, client, data, access_token, headers).await {
			Ok(()) => true,
			Err(e) => {
				obs::warn_validation_failure(provider, &e);

				false
			},
		};
		let outcome = if valid { CallOutcome::Success } else { CallOutcome::Failure };

		obs::record_call_outcome(provider, ProviderCall::ValidateSession, outcome);

		valid
	})
	.await
}

async fn check_token(
	ctx: &RequestContext,
	client: &dyn ProviderHttpClient,
	data: &ProviderData,
	access_token: &str,
	headers: &AuthHeaders,
) -> Result<()> {
	if access_token.is_empty() {
		return Err(Error::MissingCredential);
	}

	let mut endpoint = data.validate_url().cloned().ok_or_else(|| {
		ConfigError::MissingEndpoint { provider: data.name().to_owned(), endpoint: "validate" }
	})?;

	if headers.is_empty() {
		endpoint.query_pairs_mut().append_pair("access_token", access_token);
	}

	ProviderRequest::get(endpoint)
		.with_context(ctx)
		.with_headers(headers)
		.send(client)
		.await?
		.error_for_status()?;

	Ok(())
}
