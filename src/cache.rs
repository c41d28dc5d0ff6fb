//! Cache contract for the access token plus the built-in in-memory implementation.
//!
//! The cache is an external collaborator: the client never tracks token expiry itself
//! and instead delegates it entirely to the TTL the backend enforces. Values are plain
//! token strings.

pub mod memory;

pub use memory::MemoryCache;

// self
use crate::_prelude::*;

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Key-value cache contract implemented by token cache backends.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Fetches the value stored under `key`, if present and unexpired.
	fn get<'a>(&'a self, key: &'a str) -> CacheFuture<'a, Option<String>>;

	/// Stores `value` under `key`, evicting it once `ttl` elapses.
	fn set<'a>(&'a self, key: &'a str, value: &'a str, ttl: Duration) -> CacheFuture<'a, ()>;

	/// Removes the entry stored under `key`, if any.
	fn delete<'a>(&'a self, key: &'a str) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Backend-level failure for the cache engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
}
