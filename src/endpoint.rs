//! Catalog-path parsing and parameter merging.
//!
//! Catalog entries embed the upstream routing parameter directly in the path string
//! (`/company?r=company`); this module splits that string back into a plain path and
//! a parameter bag, folding in the caller-supplied parameters on top.

// self
use crate::_prelude::*;

/// Caller-supplied query parameter bag for catalog operations.
pub type QueryParams = BTreeMap<String, String>;

/// One fully resolved request against the domain API; lives only for the duration of
/// a single call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointRequest {
	/// Path component without any query string.
	pub path: String,
	/// Merged query parameters; caller-supplied values win on key collision.
	pub params: QueryParams,
}
impl EndpointRequest {
	/// Splits a catalog path into its base path and embedded query pairs, then merges
	/// the caller-supplied parameters over them.
	pub fn parse(endpoint: &str, caller: QueryParams) -> Self {
		let (path, embedded) = endpoint.split_once('?').unwrap_or((endpoint, ""));
		let mut params: QueryParams =
			url::form_urlencoded::parse(embedded.as_bytes()).into_owned().collect();

		params.extend(caller);

		Self { path: path.to_owned(), params }
	}
}
