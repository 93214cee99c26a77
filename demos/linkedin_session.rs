//! Resolves the email behind a LinkedIn access token and checks that the token is live.
//!
//! ```sh
//! LINKEDIN_ACCESS_TOKEN=... cargo run --example linkedin_session
//! ```

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use oauth2_gateway_providers::{
	context::RequestContext,
	provider::{LinkedInProvider, Provider, ProviderConfig, ProviderData},
	session::SessionState,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let token = env::var("LINKEDIN_ACCESS_TOKEN")
		.map_err(|_| eyre!("Set LINKEDIN_ACCESS_TOKEN to a LinkedIn OIDC access token."))?;
	let config: ProviderConfig = match env::var("LINKEDIN_PROVIDER_CONFIG") {
		Ok(raw) => serde_json::from_str(&raw)?,
		Err(_) => ProviderConfig::default(),
	};
	let provider = LinkedInProvider::new(ProviderData::try_from_config(&config)?);
	let ctx = RequestContext::background().with_timeout(Duration::from_secs(10));
	let session = SessionState::with_access_token(token);

	println!("Provider: {}", provider.data().name());
	println!("Session valid: {}", provider.validate_session(&ctx, &session).await);
	println!("Email: {}", provider.email_address(&ctx, &session).await?);

	Ok(())
}
