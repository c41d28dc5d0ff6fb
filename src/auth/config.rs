//! Credential configuration for the password-grant token flow.

// std
use std::env::{self, VarError};
// self
use crate::{
	_prelude::*,
	auth::Secret,
	error::{AuthError, ConfigError},
};

/// Credentials and endpoints for OAuth token acquisition.
///
/// Loaded once at construction and immutable for the life of the client. The four
/// credential fields are only *validated* when a token is actually acquired: an
/// instance with gaps can be built (mirroring env-based loading where variables may be
/// absent), but [`AuthConfig::require_credentials`] fails before any network call.
#[derive(Clone, Debug)]
pub struct AuthConfig {
	/// Base URL for all domain calls.
	pub base_url: Url,
	/// Token endpoint URL; defaults to `/oauth/token` on the base host.
	pub token_url: Url,
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Resource-owner username.
	pub username: String,
	/// Resource-owner password.
	pub password: Secret,
	/// Requested scope; may be empty.
	pub scope: String,
	/// TTL applied when the token response omits `expires_in`.
	pub default_token_ttl: Duration,
}
impl AuthConfig {
	/// Production API host used when no base URL is configured.
	pub const DEFAULT_BASE_URL: &'static str = "https://api.lursoft.lv";
	/// Scope requested when none is configured.
	pub const DEFAULT_SCOPE: &'static str = "organization:LURSOFT";
	/// Fallback token TTL when the token response omits `expires_in`.
	pub const DEFAULT_TOKEN_TTL: Duration = Duration::seconds(3_600);
	/// Fixed token endpoint path on the base host.
	pub const TOKEN_PATH: &'static str = "/oauth/token";

	/// Builds a configuration for the provided base URL and credential fields, with
	/// the default scope and token endpoint.
	pub fn new(
		base_url: Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let token_url = base_url
			.join(Self::TOKEN_PATH)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(Self {
			base_url,
			token_url,
			client_id: client_id.into(),
			client_secret: Secret::new(client_secret),
			username: username.into(),
			password: Secret::new(password),
			scope: Self::DEFAULT_SCOPE.into(),
			default_token_ttl: Self::DEFAULT_TOKEN_TTL,
		})
	}

	/// Loads configuration from `LURSOFT_*` environment variables.
	///
	/// `LURSOFT_BASE_URL` and `LURSOFT_SCOPE` fall back to their defaults; absent
	/// credential variables load as empty strings and fail later at token time.
	pub fn from_env() -> Result<Self, ConfigError> {
		let base_url = Url::parse(&read_env("LURSOFT_BASE_URL")?.unwrap_or_else(|| Self::DEFAULT_BASE_URL.into()))
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;
		let config = Self::new(
			base_url,
			read_env("LURSOFT_CLIENT_ID")?.unwrap_or_default(),
			read_env("LURSOFT_CLIENT_SECRET")?.unwrap_or_default(),
			read_env("LURSOFT_USERNAME")?.unwrap_or_default(),
			read_env("LURSOFT_PASSWORD")?.unwrap_or_default(),
		)?;

		Ok(match read_env("LURSOFT_SCOPE")? {
			Some(scope) => config.with_scope(scope),
			None => config,
		})
	}

	/// Overrides the requested scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = scope.into();

		self
	}

	/// Overrides the token endpoint, for deployments with a dedicated OAuth host.
	pub fn with_token_url(mut self, token_url: Url) -> Self {
		self.token_url = token_url;

		self
	}

	/// Overrides the fallback TTL used when the token response omits `expires_in`.
	pub fn with_default_token_ttl(mut self, ttl: Duration) -> Self {
		self.default_token_ttl = ttl;

		self
	}

	/// Validates that every credential field required for the password grant is
	/// non-empty. Scope is exempt.
	pub fn require_credentials(&self) -> Result<(), AuthError> {
		let fields = [
			("client_id", self.client_id.as_str()),
			("client_secret", self.client_secret.expose()),
			("username", self.username.as_str()),
			("password", self.password.expose()),
		];

		for (field, value) in fields {
			if value.is_empty() {
				return Err(AuthError::MissingCredential { field });
			}
		}

		Ok(())
	}

	/// Assembles the form-encoded body for the password-grant POST.
	pub(crate) fn grant_form(&self) -> Vec<(String, String)> {
		vec![
			("grant_type".into(), "password".into()),
			("client_id".into(), self.client_id.clone()),
			("client_secret".into(), self.client_secret.expose().to_owned()),
			("username".into(), self.username.clone()),
			("password".into(), self.password.expose().to_owned()),
			("scope".into(), self.scope.clone()),
		]
	}
}

fn read_env(name: &'static str) -> Result<Option<String>, ConfigError> {
	match env::var(name) {
		Ok(value) => Ok(Some(value)),
		Err(VarError::NotPresent) => Ok(None),
		Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv { name }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> AuthConfig {
		AuthConfig::new(
			Url::parse(AuthConfig::DEFAULT_BASE_URL).expect("Default base URL should parse."),
			"cid",
			"csecret",
			"user",
			"pass",
		)
		.expect("Configuration fixture should build.")
	}

	#[test]
	fn token_url_joins_fixed_path() {
		assert_eq!(config().token_url.as_str(), "https://api.lursoft.lv/oauth/token");
	}

	#[test]
	fn require_credentials_accepts_complete_configuration() {
		config().require_credentials().expect("Complete credentials should validate.");
	}

	#[test]
	fn require_credentials_names_the_first_missing_field() {
		let mut incomplete = config();

		incomplete.password = Secret::new("");

		assert_eq!(
			incomplete.require_credentials(),
			Err(AuthError::MissingCredential { field: "password" })
		);

		incomplete.client_id.clear();

		assert_eq!(
			incomplete.require_credentials(),
			Err(AuthError::MissingCredential { field: "client_id" })
		);
	}

	#[test]
	fn empty_scope_is_permitted() {
		config().with_scope("").require_credentials().expect("Scope may be empty.");
	}

	#[test]
	fn grant_form_carries_all_password_grant_fields() {
		let form = config().grant_form();

		assert_eq!(form[0], ("grant_type".to_owned(), "password".to_owned()));
		assert!(form.contains(&("client_secret".to_owned(), "csecret".to_owned())));
		assert!(form.contains(&("scope".to_owned(), AuthConfig::DEFAULT_SCOPE.to_owned())));
		assert_eq!(form.len(), 6);
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let rendered = format!("{:?}", config());

		assert!(!rendered.contains("csecret"));
		assert!(!rendered.contains("pass\""));
		assert!(rendered.contains("<redacted>"));
	}
}
