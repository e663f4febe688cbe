//! Injectable hook that sees every outgoing request before it is sent.

// crates.io
use reqwest::{
	Request,
	header::{AUTHORIZATION, HeaderMap},
};
use serde_json::Value;
// self
use crate::_prelude::*;

/// JSON body fields whose values never leave the process unredacted.
pub const SENSITIVE_FIELDS: &[&str] = &["client_secret", "password"];

/// Borrowed view of an outgoing request handed to [`RequestTrace`] implementations.
#[derive(Clone, Copy, Debug)]
pub struct RequestSnapshot<'a> {
	/// HTTP method.
	pub method: &'a Method,
	/// Fully resolved request URL.
	pub url: &'a Url,
	/// Request headers, including the bearer token when present.
	pub headers: &'a HeaderMap,
	/// Buffered body bytes; `None` for empty or streamed (multipart) bodies.
	pub body: Option<&'a [u8]>,
}
impl<'a> RequestSnapshot<'a> {
	/// Captures a snapshot of a built reqwest request.
	pub fn of(request: &'a Request) -> Self {
		Self {
			method: request.method(),
			url: request.url(),
			headers: request.headers(),
			body: request.body().and_then(|body| body.as_bytes()),
		}
	}

	/// Returns header name/value pairs with the `Authorization` value replaced by
	/// `<redacted>`.
	pub fn redacted_headers(&self) -> Vec<(String, String)> {
		self.headers
			.iter()
			.map(|(name, value)| {
				let shown = if name == AUTHORIZATION {
					"<redacted>".to_owned()
				} else {
					String::from_utf8_lossy(value.as_bytes()).into_owned()
				};

				(name.as_str().to_owned(), shown)
			})
			.collect()
	}

	/// Returns the body as lossy UTF-8 text, if buffered.
	pub fn body_text(&self) -> Option<String> {
		self.body.map(|bytes| String::from_utf8_lossy(bytes).into_owned())
	}

	/// Returns the body with every [`SENSITIVE_FIELDS`] value replaced by `<redacted>`.
	///
	/// Non-JSON bodies are returned as lossy UTF-8 text.
	pub fn redacted_body(&self) -> Option<String> {
		let bytes = self.body?;

		match serde_json::from_slice::<Value>(bytes) {
			Ok(mut value) => {
				redact_value(&mut value);

				Some(value.to_string())
			},
			Err(_) => self.body_text(),
		}
	}
}

fn redact_value(value: &mut Value) {
	match value {
		Value::Object(map) =>
			for (key, field) in map.iter_mut() {
				if SENSITIVE_FIELDS.contains(&key.as_str()) {
					*field = Value::String("<redacted>".into());
				} else {
					redact_value(field);
				}
			},
		Value::Array(items) => items.iter_mut().for_each(redact_value),
		_ => {},
	}
}

/// Receives every outgoing request right before it hits the network.
///
/// Implementations must not block; they run inline on the caller's task.
pub trait RequestTrace: Send + Sync {
	/// Observes a request about to be sent.
	fn on_request(&self, request: &RequestSnapshot<'_>);
}

/// Default hook that logs method, URL, redacted headers, and redacted body at `debug` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;
impl RequestTrace for LogTrace {
	fn on_request(&self, request: &RequestSnapshot<'_>) {
		#[cfg(feature = "tracing")]
		{
			tracing::debug!(
				method = %request.method,
				url = %request.url,
				headers = ?request.redacted_headers(),
				body = request.redacted_body().as_deref().unwrap_or(""),
				"sending Easemob request"
			);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = request;
		}
	}
}

/// Hook that discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTrace;
impl RequestTrace for NoopTrace {
	fn on_request(&self, _request: &RequestSnapshot<'_>) {}
}
