//! Thread-safe in-memory [`TokenCache`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	cache::{CacheFuture, TokenCache},
};

type CacheMap = Arc<RwLock<HashMap<String, CacheEntry>>>;

#[derive(Clone, Debug)]
struct CacheEntry {
	value: String,
	expires_at: OffsetDateTime,
}

/// Thread-safe cache backend that keeps entries in-process for tests and demos.
///
/// Expired entries are filtered on read and overwritten on the next `set`; no
/// background sweeper runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	fn get_now(map: CacheMap, key: &str, now: OffsetDateTime) -> Option<String> {
		map.read().get(key).filter(|entry| entry.expires_at > now).map(|entry| entry.value.clone())
	}

	fn set_now(map: CacheMap, key: String, value: String, ttl: Duration, now: OffsetDateTime) {
		map.write().insert(key, CacheEntry { value, expires_at: now + ttl });
	}

	fn delete_now(map: CacheMap, key: &str) {
		map.write().remove(key);
	}
}
impl TokenCache for MemoryCache {
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, key, OffsetDateTime::now_utc())) })
	}

	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::set_now(map, key.to_owned(), value.to_owned(), ttl, OffsetDateTime::now_utc());

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::delete_now(map, key);

			Ok(())
		})
	}
}
