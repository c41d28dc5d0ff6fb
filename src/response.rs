//! Normalized wrapper around one upstream JSON response.
//!
//! The Lursoft API answers with loosely shaped JSON mappings; [`LursoftResponse`]
//! derives a uniform `success`/`message`/`results` view at construction time while
//! keeping the untouched payload reachable through [`LursoftResponse::raw`].

// self
use crate::{_prelude::*, error::ProtocolError};

/// Normalized view over one upstream response mapping plus its HTTP status code.
///
/// Construction is a pure transform: `success` holds exactly when the payload carries
/// `"status": "success"`, and `message` is populated exactly when it does not. HTTP
/// error statuses never prevent construction; callers branch on
/// [`is_success`](Self::is_success) and [`status_code`](Self::status_code) instead of
/// on errors.
#[derive(Clone, Debug, PartialEq)]
pub struct LursoftResponse {
	status_code: u16,
	raw: JsonMap<String, Value>,
	success: bool,
	message: Option<String>,
}
impl LursoftResponse {
	/// Builds a response from an already parsed payload mapping and HTTP status code.
	pub fn new(raw: JsonMap<String, Value>, status_code: u16) -> Self {
		let success = raw.get("status").and_then(Value::as_str) == Some("success");
		let message = if success {
			None
		} else {
			Some(
				raw.get("message")
					.and_then(Value::as_str)
					.unwrap_or("Unknown error")
					.to_owned(),
			)
		};

		Self { status_code, raw, success, message }
	}

	/// Parses raw body bytes and builds a response.
	///
	/// Bodies that are not JSON at all and bodies whose top level is not a mapping are
	/// both [`ProtocolError`]s; everything else, including error payloads delivered
	/// with 4xx/5xx statuses, becomes a non-success response.
	pub fn from_body(body: &[u8], status_code: u16) -> Result<Self, ProtocolError> {
		match parse_json(body)? {
			Value::Object(raw) => Ok(Self::new(raw, status_code)),
			_ => Err(ProtocolError::InvalidFormat),
		}
	}

	/// Returns `true` when the payload declared itself successful.
	pub fn is_success(&self) -> bool {
		self.success
	}

	/// Returns the upstream error message; `None` exactly when the call succeeded.
	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	/// Returns the HTTP status code the payload arrived with.
	pub fn status_code(&self) -> u16 {
		self.status_code
	}

	/// Returns the untouched upstream payload.
	pub fn raw(&self) -> &JsonMap<String, Value> {
		&self.raw
	}

	/// Returns the payload's `data` field when it is a mapping or sequence, otherwise
	/// an empty sequence. The rule applies uniformly regardless of `success`.
	pub fn results(&self) -> Value {
		match self.raw.get("data") {
			Some(value @ (Value::Object(_) | Value::Array(_))) => value.clone(),
			_ => Value::Array(Vec::new()),
		}
	}

	/// Returns `true` when [`results`](Self::results) is non-empty.
	pub fn has_results(&self) -> bool {
		match self.results() {
			Value::Array(items) => !items.is_empty(),
			Value::Object(entries) => !entries.is_empty(),
			_ => false,
		}
	}

	/// Exports the normalized view plus the original payload as one JSON mapping.
	pub fn to_value(&self) -> Value {
		serde_json::json!({
			"success": self.success,
			"message": self.message,
			"status_code": self.status_code,
			"data": self.results(),
			"raw_response": Value::Object(self.raw.clone()),
		})
	}
}

/// Parses body bytes as a JSON value, reporting the failing path on malformed input.
pub(crate) fn parse_json(body: &[u8]) -> Result<Value, ProtocolError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProtocolError::MalformedJson { source })
}
