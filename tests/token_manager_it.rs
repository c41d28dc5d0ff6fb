// crates.io
use httpmock::prelude::*;
// self
use lursoft_client::{
	auth::{AuthConfig, Secret, TOKEN_CACHE_KEY, TokenManager},
	cache::{CacheFuture, MemoryCache, TokenCache},
	error::{AuthError, Error, ProtocolError},
	http::ReqwestTransport,
	url::Url,
};
use std::sync::{Arc, Mutex};
use time::Duration;

/// Cache decorator that records every `set` call so tests can assert the TTL the
/// manager derived from the token response.
#[derive(Debug, Default)]
struct RecordingCache {
	inner: MemoryCache,
	sets: Mutex<Vec<(String, String, Duration)>>,
}
impl RecordingCache {
	fn recorded_sets(&self) -> Vec<(String, String, Duration)> {
		self.sets.lock().expect("Recording mutex should not be poisoned.").clone()
	}
}
impl TokenCache for RecordingCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
		self.inner.get(key)
	}

	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()> {
		self.sets
			.lock()
			.expect("Recording mutex should not be poisoned.")
			.push((key.to_owned(), value.to_owned(), ttl));

		self.inner.set(key, value, ttl)
	}

	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()> {
		self.inner.delete(key)
	}
}

fn test_config(server: &MockServer) -> AuthConfig {
	let base_url = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	AuthConfig::new(base_url, "client-id", "client-secret", "user", "pass")
		.expect("Test configuration should build.")
}

fn build_manager(config: AuthConfig) -> (TokenManager, Arc<MemoryCache>) {
	let cache = Arc::new(MemoryCache::default());
	let transport = Arc::new(ReqwestTransport::new().expect("Reqwest transport should build."));
	let manager = TokenManager::new(transport, cache.clone(), config);

	(manager, cache)
}

#[tokio::test]
async fn cache_hit_skips_the_token_endpoint() {
	let server = MockServer::start_async().await;
	let (manager, cache) = build_manager(test_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(500);
		})
		.await;

	cache
		.set(TOKEN_CACHE_KEY, "cached-token", Duration::seconds(60))
		.await
		.expect("Seeding the cache should succeed.");

	let token = manager.access_token().await.expect("Cached token should be returned as-is.");

	assert_eq!(token, "cached-token");

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn cache_miss_posts_the_grant_once_and_caches_the_token() {
	let server = MockServer::start_async().await;
	let (manager, cache) = build_manager(test_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body_includes("grant_type=password")
				.body_includes("client_id=client-id")
				.body_includes("username=user");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"fresh-token\",\"token_type\":\"bearer\",\"expires_in\":1800}",
			);
		})
		.await;
	let first = manager.access_token().await.expect("Initial token request should succeed.");
	let second = manager.access_token().await.expect("Cached token request should succeed.");

	assert_eq!(first, "fresh-token");
	assert_eq!(second, "fresh-token");

	mock.assert_calls_async(1).await;

	let stored = cache
		.get(TOKEN_CACHE_KEY)
		.await
		.expect("Cache read should succeed.")
		.expect("Token should have been cached under the fixed key.");

	assert_eq!(stored, "fresh-token");
}

#[tokio::test]
async fn cached_ttl_follows_the_upstream_expires_in() {
	let server = MockServer::start_async().await;
	let cache = Arc::new(RecordingCache::default());
	let transport = Arc::new(ReqwestTransport::new().expect("Reqwest transport should build."));
	let manager = TokenManager::new(transport, cache.clone(), test_config(&server));
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"timed-token\",\"expires_in\":1800}");
		})
		.await;

	manager.access_token().await.expect("Token request should succeed.");

	assert_eq!(
		cache.recorded_sets(),
		vec![(TOKEN_CACHE_KEY.to_owned(), "timed-token".to_owned(), Duration::seconds(1_800))]
	);
}

#[tokio::test]
async fn missing_expires_in_falls_back_to_the_configured_ttl() {
	let server = MockServer::start_async().await;
	let cache = Arc::new(RecordingCache::default());
	let transport = Arc::new(ReqwestTransport::new().expect("Reqwest transport should build."));
	let config = test_config(&server).with_default_token_ttl(Duration::seconds(120));
	let manager = TokenManager::new(transport, cache.clone(), config);
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"untimed-token\"}");
		})
		.await;

	manager.access_token().await.expect("Token request should succeed.");

	assert_eq!(
		cache.recorded_sets(),
		vec![(TOKEN_CACHE_KEY.to_owned(), "untimed-token".to_owned(), Duration::seconds(120))]
	);
}

#[tokio::test]
async fn missing_credentials_fail_before_any_network_call() {
	let server = MockServer::start_async().await;
	let mut config = test_config(&server);

	config.password = Secret::new("");

	let (manager, _cache) = build_manager(config);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200);
		})
		.await;
	let err = manager
		.access_token()
		.await
		.expect_err("Missing credentials should fail before the wire.");

	assert!(matches!(
		err,
		Error::Auth(AuthError::MissingCredential { field: "password" })
	));

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn token_body_without_access_token_is_a_protocol_error() {
	let server = MockServer::start_async().await;
	let (manager, cache) = build_manager(test_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token_type\":\"bearer\",\"expires_in\":1800}");
		})
		.await;
	let err = manager
		.access_token()
		.await
		.expect_err("A token body without access_token should be rejected.");

	assert!(matches!(err, Error::Protocol(ProtocolError::InvalidFormat)));
	assert_eq!(err.to_string(), "Invalid response format.");

	mock.assert_async().await;

	let stored = cache.get(TOKEN_CACHE_KEY).await.expect("Cache read should succeed.");

	assert_eq!(stored, None);
}

#[tokio::test]
async fn token_endpoint_http_errors_surface_with_the_upstream_reason() {
	let server = MockServer::start_async().await;
	let (manager, _cache) = build_manager(test_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"message\":\"bad credentials\"}");
		})
		.await;
	let err = manager
		.access_token()
		.await
		.expect_err("A rejected grant should surface to the caller.");

	assert!(matches!(
		&err,
		Error::Protocol(ProtocolError::TokenEndpoint { status: 401, message }) if message.as_str() == "bad credentials"
	));

	mock.assert_async().await;
}

#[tokio::test]
async fn non_json_token_body_is_a_protocol_error() {
	let server = MockServer::start_async().await;
	let (manager, _cache) = build_manager(test_config(&server));
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200).header("content-type", "text/html").body("<html>oops</html>");
		})
		.await;
	let err = manager
		.access_token()
		.await
		.expect_err("A non-JSON token body should be rejected.");

	assert!(matches!(err, Error::Protocol(ProtocolError::MalformedJson { .. })));
}

#[tokio::test]
async fn empty_cached_token_is_treated_as_a_miss() {
	let server = MockServer::start_async().await;
	let (manager, cache) = build_manager(test_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"replacement\",\"expires_in\":60}");
		})
		.await;

	cache
		.set(TOKEN_CACHE_KEY, "", Duration::seconds(60))
		.await
		.expect("Seeding the cache should succeed.");

	let token = manager.access_token().await.expect("An empty entry should trigger a refresh.");

	assert_eq!(token, "replacement");

	mock.assert_calls_async(1).await;
}
