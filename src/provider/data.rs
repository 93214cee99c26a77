//! Base provider configuration record and its external-configuration entry points.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{
		ProviderDefaults,
		headers::{AuthHeaders, HeaderBuilderFn, make_bearer_header},
	},
};

/// Serializable provider overrides loaded by the gateway (TOML, JSON, env, ...).
///
/// Every field is optional; empty strings count as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
	/// Display name override.
	pub name: Option<String>,
	/// Authorization endpoint override.
	pub login_url: Option<String>,
	/// Token endpoint override.
	pub redeem_url: Option<String>,
	/// Userinfo endpoint override.
	pub profile_url: Option<String>,
	/// Validation endpoint override.
	pub validate_url: Option<String>,
	/// Scope override.
	pub scope: Option<String>,
}

/// Endpoint and scope record shared by every provider variant.
///
/// A gateway fills in whatever it has configured, then hands the record to a variant
/// constructor which applies that variant's [`ProviderDefaults`] to the remaining gaps.
/// The record is read-only once a variant owns it.
#[derive(Clone, Debug, Default)]
pub struct ProviderData {
	name: Option<String>,
	login_url: Option<Url>,
	redeem_url: Option<Url>,
	profile_url: Option<Url>,
	validate_url: Option<Url>,
	scope: Option<String>,
	authorization_header: Option<HeaderBuilderFn>,
}
impl ProviderData {
	/// Creates a builder for programmatic configuration.
	pub fn builder() -> ProviderDataBuilder {
		ProviderDataBuilder::default()
	}

	/// Parses and validates serialized overrides.
	pub fn try_from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
		let mut builder = Self::builder();

		builder.name = non_empty(config.name.as_deref()).map(str::to_owned);
		builder.login_url = parse_endpoint("login", config.login_url.as_deref())?;
		builder.redeem_url = parse_endpoint("redeem", config.redeem_url.as_deref())?;
		builder.profile_url = parse_endpoint("profile", config.profile_url.as_deref())?;
		builder.validate_url = parse_endpoint("validate", config.validate_url.as_deref())?;
		builder.scope = non_empty(config.scope.as_deref()).map(str::to_owned);

		builder.build()
	}

	/// Fills every unset field from `defaults`; configured fields are left untouched.
	pub fn set_provider_defaults(&mut self, defaults: &ProviderDefaults) {
		set_if_absent(&mut self.name, || Some(defaults.name.to_owned()));
		set_if_absent(&mut self.login_url, || Url::parse(defaults.login_url).ok());
		set_if_absent(&mut self.redeem_url, || Url::parse(defaults.redeem_url).ok());
		set_if_absent(&mut self.profile_url, || Url::parse(defaults.profile_url).ok());
		set_if_absent(&mut self.validate_url, || Url::parse(defaults.validate_url).ok());
		set_if_absent(&mut self.scope, || Some(defaults.scope.to_owned()));
	}

	/// Installs the variant's header builder.
	pub fn set_authorization_header(&mut self, builder: HeaderBuilderFn) {
		self.authorization_header = Some(builder);
	}

	/// Display name, or an empty string before defaults are applied.
	pub fn name(&self) -> &str {
		self.name.as_deref().unwrap_or_default()
	}

	/// Authorization endpoint.
	pub fn login_url(&self) -> Option<&Url> {
		self.login_url.as_ref()
	}

	/// Token endpoint.
	pub fn redeem_url(&self) -> Option<&Url> {
		self.redeem_url.as_ref()
	}

	/// Userinfo endpoint.
	pub fn profile_url(&self) -> Option<&Url> {
		self.profile_url.as_ref()
	}

	/// Validation endpoint.
	pub fn validate_url(&self) -> Option<&Url> {
		self.validate_url.as_ref()
	}

	/// Requested scope.
	pub fn scope(&self) -> Option<&str> {
		self.scope.as_deref()
	}

	/// Userinfo endpoint, or [`ConfigError::MissingEndpoint`].
	pub fn require_profile_url(&self) -> Result<&Url, ConfigError> {
		self.profile_url.as_ref().ok_or_else(|| ConfigError::MissingEndpoint {
			provider: self.name().to_owned(),
			endpoint: "profile",
		})
	}

	/// Builds the header set for `access_token` with the installed builder, falling back to
	/// a plain bearer header set.
	pub fn authorization_header(&self, access_token: &str) -> AuthHeaders {
		self.authorization_header.unwrap_or(make_bearer_header)(access_token)
	}
}

/// Builder for [`ProviderData`] values.
#[derive(Debug, Default)]
pub struct ProviderDataBuilder {
	/// Display name override.
	pub name: Option<String>,
	/// Authorization endpoint override.
	pub login_url: Option<Url>,
	/// Token endpoint override.
	pub redeem_url: Option<Url>,
	/// Userinfo endpoint override.
	pub profile_url: Option<Url>,
	/// Validation endpoint override.
	pub validate_url: Option<Url>,
	/// Scope override.
	pub scope: Option<String>,
}
impl ProviderDataBuilder {
	/// Sets the display name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the authorization endpoint.
	pub fn login_url(mut self, url: Url) -> Self {
		self.login_url = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn redeem_url(mut self, url: Url) -> Self {
		self.redeem_url = Some(url);

		self
	}

	/// Sets the userinfo endpoint.
	pub fn profile_url(mut self, url: Url) -> Self {
		self.profile_url = Some(url);

		self
	}

	/// Sets the validation endpoint.
	pub fn validate_url(mut self, url: Url) -> Self {
		self.validate_url = Some(url);

		self
	}

	/// Sets the requested scope.
	pub fn scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Consumes the builder and validates the configured endpoints.
	pub fn build(self) -> Result<ProviderData, ConfigError> {
		let endpoints = [
			("login", &self.login_url),
			("redeem", &self.redeem_url),
			("profile", &self.profile_url),
			("validate", &self.validate_url),
		];

		for (name, url) in endpoints {
			if let Some(url) = url {
				validate_endpoint(name, url)?;
			}
		}

		Ok(ProviderData {
			name: self.name,
			login_url: self.login_url,
			redeem_url: self.redeem_url,
			profile_url: self.profile_url,
			validate_url: self.validate_url,
			scope: self.scope,
			authorization_header: None,
		})
	}
}

fn set_if_absent<T>(slot: &mut Option<T>, default: impl FnOnce() -> Option<T>) {
	if slot.is_none() {
		*slot = default();
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_endpoint(name: &'static str, raw: Option<&str>) -> Result<Option<Url>, ConfigError> {
	non_empty(raw)
		.map(|raw| {
			Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { endpoint: name, source })
		})
		.transpose()
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if matches!(url.scheme(), "https" | "http") && url.has_host() {
		Ok(())
	} else {
		Err(ConfigError::UnsupportedEndpoint { endpoint: name, url: url.to_string() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const DEFAULTS: ProviderDefaults = ProviderDefaults {
		name: "Example",
		login_url: "https://login.example.com/authorize",
		redeem_url: "https://login.example.com/token",
		profile_url: "https://api.example.com/me",
		validate_url: "https://api.example.com/me",
		scope: "openid",
	};

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn defaults_fill_only_unset_fields() {
		let mut data = ProviderData::builder()
			.login_url(url("https://sso.internal/authorize"))
			.scope("openid email")
			.build()
			.expect("Builder should accept https endpoints.");

		data.set_provider_defaults(&DEFAULTS);

		assert_eq!(data.name(), "Example");
		assert_eq!(data.login_url().map(Url::as_str), Some("https://sso.internal/authorize"));
		assert_eq!(data.redeem_url().map(Url::as_str), Some("https://login.example.com/token"));
		assert_eq!(data.scope(), Some("openid email"));
	}

	#[test]
	fn applying_defaults_twice_is_idempotent() {
		let mut once = ProviderData::default();

		once.set_provider_defaults(&DEFAULTS);

		let mut twice = once.clone();

		twice.set_provider_defaults(&DEFAULTS);

		assert_eq!(once.profile_url(), twice.profile_url());
		assert_eq!(once.validate_url(), twice.validate_url());
		assert_eq!(once.scope(), twice.scope());
	}

	#[test]
	fn config_treats_blank_values_as_unset() {
		let config = ProviderConfig {
			name: Some("  ".into()),
			profile_url: Some("http://127.0.0.1:8080/userinfo".into()),
			validate_url: Some(String::new()),
			..Default::default()
		};
		let data = ProviderData::try_from_config(&config).expect("Config should parse.");

		assert_eq!(data.name(), "");
		assert_eq!(data.profile_url().map(Url::as_str), Some("http://127.0.0.1:8080/userinfo"));
		assert!(data.validate_url().is_none());
	}

	#[test]
	fn config_rejects_relative_and_non_http_urls() {
		let relative =
			ProviderConfig { login_url: Some("/authorize".into()), ..Default::default() };

		assert!(matches!(
			ProviderData::try_from_config(&relative),
			Err(ConfigError::InvalidUrl { endpoint: "login", .. })
		));

		let mailto = ProviderConfig {
			profile_url: Some("mailto:me@example.com".into()),
			..Default::default()
		};

		assert!(matches!(
			ProviderData::try_from_config(&mailto),
			Err(ConfigError::UnsupportedEndpoint { endpoint: "profile", .. })
		));
	}

	#[test]
	fn config_deserializes_from_json() {
		let config: ProviderConfig =
			serde_json::from_str(r#"{"scope":"openid","profile_url":"https://api.example.com/me"}"#)
				.expect("Partial config should deserialize.");

		assert_eq!(config.scope.as_deref(), Some("openid"));
		assert!(config.login_url.is_none());
	}

	#[test]
	fn missing_profile_url_is_reported() {
		let err = ProviderData::default()
			.require_profile_url()
			.expect_err("Empty data has no profile URL.");

		assert!(matches!(err, ConfigError::MissingEndpoint { endpoint: "profile", .. }));
	}

	#[test]
	fn header_builder_falls_back_to_plain_bearer() {
		let data = ProviderData::default();
		let headers = data.authorization_header("abc");

		assert_eq!(headers, make_bearer_header("abc"));
	}
}
