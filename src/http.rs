//! Transport primitives for Lursoft API calls.
//!
//! The module exposes [`HttpTransport`] as the client's only dependency on an HTTP
//! stack: any implementation that can send a GET with a query string or a POST with a
//! form-encoded body, and hand back the status code plus raw bytes, will do. The
//! bundled [`ReqwestTransport`] wraps [`ReqwestClient`] behind the default `reqwest`
//! feature. HTTP error statuses are not surfaced as transport errors; callers decide
//! what a 4xx/5xx means.

// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// HTTP method subset used by the Lursoft API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// Domain lookups.
	Get,
	/// Token acquisition.
	Post,
}

/// One outbound request, fully assembled by the caller.
///
/// The query string is already encoded into `url`; `form` is only set for the
/// token-endpoint POST.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute request URL including any query string.
	pub url: Url,
	/// Header name/value pairs to attach verbatim.
	pub headers: Vec<(String, String)>,
	/// Form-encoded body pairs, when the method carries a body.
	pub form: Option<Vec<(String, String)>>,
}
impl HttpRequest {
	/// Builds a GET request for the provided URL.
	pub fn get(url: Url) -> Self {
		Self { method: HttpMethod::Get, url, headers: Vec::new(), form: None }
	}

	/// Builds a form-encoded POST request for the provided URL.
	pub fn post_form(url: Url, form: Vec<(String, String)>) -> Self {
		Self { method: HttpMethod::Post, url, headers: Vec::new(), form: Some(form) }
	}

	/// Attaches a bearer token as the `Authorization` header.
	pub fn bearer(mut self, token: &str) -> Self {
		self.headers.push(("Authorization".into(), format!("Bearer {token}")));

		self
	}
}

/// Raw response handed back by a transport: status code plus unparsed body bytes.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Unparsed response body.
	pub body: Vec<u8>,
}

/// Abstraction over HTTP transports capable of executing Lursoft API calls.
///
/// Implementations must be `Send + Sync` so a single transport can be shared behind
/// `Arc<dyn HttpTransport>` across concurrently executing calls. A transport-level
/// timeout or connection failure must surface as [`TransportError`]; an HTTP error
/// status must not.
pub trait HttpTransport
where
	Self: Send + Sync,
{
	/// Sends one request and resolves with the raw status + body.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Default request timeout applied by [`ReqwestTransport::new`], in seconds.
	pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

	/// Builds a transport with the crate's default timeout.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(std::time::Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS))
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = match request.method {
				HttpMethod::Get => client.get(request.url),
				HttpMethod::Post => client.post(request.url),
			};

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(form) = &request.form {
				builder = builder.form(form);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
