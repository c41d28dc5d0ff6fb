//! Async client for the Lursoft registry API—legal entity, person, sanctions, address,
//! vehicle, and insolvency lookups behind a cached OAuth password grant.
//!
//! The crate authenticates once via the resource-owner-password grant, parks the issued
//! access token in a caller-supplied [`cache::TokenCache`], and translates each catalog
//! operation on [`client::LursoftClient`] into an HTTP GET whose heterogeneous upstream
//! payload is normalized into a [`response::LursoftResponse`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod response;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
