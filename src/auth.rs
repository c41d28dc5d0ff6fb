//! OAuth password-grant token acquisition and caching.
//!
//! [`TokenManager`] owns the token protocol: check the cache under a fixed key, and on
//! a miss validate credentials, POST the credential grant, and park the issued token
//! back in the cache with the upstream-announced TTL. Token expiry is delegated
//! entirely to the cache's TTL mechanism; no refresh-ahead logic exists.

pub mod config;
pub mod secret;

pub use config::AuthConfig;
pub use secret::Secret;

// self
use crate::{
	_prelude::*,
	cache::TokenCache,
	error::ProtocolError,
	http::{HttpRequest, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	response,
};

/// Fixed cache key under which the access token is stored.
pub const TOKEN_CACHE_KEY: &str = "lursoft_access_token";

/// Acquires and caches the API access token.
#[derive(Clone)]
pub struct TokenManager {
	transport: Arc<dyn HttpTransport>,
	cache: Arc<dyn TokenCache>,
	config: AuthConfig,
}
impl TokenManager {
	/// Creates a manager over the provided transport, cache, and credentials.
	pub fn new(
		transport: Arc<dyn HttpTransport>,
		cache: Arc<dyn TokenCache>,
		config: AuthConfig,
	) -> Self {
		Self { transport, cache, config }
	}

	/// Returns the credential configuration.
	pub fn config(&self) -> &AuthConfig {
		&self.config
	}

	/// Returns a valid access token, acquiring one from the token endpoint on a cache
	/// miss.
	///
	/// A cached token is returned as-is with no upstream validation. Acquisition is
	/// not serialized: concurrent cache misses each issue their own grant and the last
	/// write to the cache wins; the redundant fetches are accepted behavior.
	pub async fn access_token(&self) -> Result<String> {
		let span = CallSpan::new(CallKind::Token, AuthConfig::TOKEN_PATH);

		obs::record_call_outcome(CallKind::Token, CallOutcome::Attempt);

		let result = span.instrument(self.acquire()).await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallKind::Token, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(CallKind::Token, CallOutcome::Failure),
		}

		result
	}

	async fn acquire(&self) -> Result<String> {
		if let Some(token) =
			self.cache.get(TOKEN_CACHE_KEY).await?.filter(|token| !token.is_empty())
		{
			return Ok(token);
		}

		self.config.require_credentials()?;

		let request =
			HttpRequest::post_form(self.config.token_url.clone(), self.config.grant_form());
		let raw = self.transport.send(request).await?;

		if !(200..300).contains(&raw.status) {
			return Err(ProtocolError::TokenEndpoint {
				status: raw.status,
				message: rejection_message(&raw.body),
			}
			.into());
		}

		let grant = match response::parse_json(&raw.body)? {
			Value::Object(map) => map,
			_ => return Err(ProtocolError::InvalidFormat.into()),
		};
		let token = grant
			.get("access_token")
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.ok_or(ProtocolError::InvalidFormat)?;
		let ttl = grant
			.get("expires_in")
			.and_then(Value::as_i64)
			.filter(|seconds| *seconds > 0)
			.map(Duration::seconds)
			.unwrap_or(self.config.default_token_ttl);

		self.cache.set(TOKEN_CACHE_KEY, token, ttl).await?;

		Ok(token.to_owned())
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

/// Extracts a human-readable rejection reason from a token endpoint error body.
fn rejection_message(body: &[u8]) -> String {
	response::parse_json(body)
		.ok()
		.as_ref()
		.and_then(|value| {
			["message", "error_description", "error"]
				.iter()
				.find_map(|key| value.get(key).and_then(Value::as_str))
				.map(str::to_owned)
		})
		.unwrap_or_else(|| "credential grant was rejected".into())
}
