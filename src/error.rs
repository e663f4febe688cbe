//! SDK-level error types shared by the token manager, transport, and domain operations.

// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Operation-specific failure signaled inside a successful reply.
	#[error(transparent)]
	Domain(#[from] DomainError),

	/// Platform answered with a non-200 status.
	#[error("Easemob returned HTTP {status}: {body}.")]
	Remote {
		/// HTTP status code.
		status: u16,
		/// Raw response body, kept verbatim for diagnostics.
		body: String,
	},
	/// Bearer token could not be obtained, so the authenticated call was never sent.
	#[error("Failed to acquire an access token.")]
	TokenAcquisition {
		/// Failure raised by the token endpoint call.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Wraps a token endpoint failure.
	pub fn token_acquisition(source: Error) -> Self {
		Self::TokenAcquisition { source: Box::new(source) }
	}

	/// Returns the HTTP status for [`Error::Remote`], looking through token acquisition
	/// failures.
	pub fn remote_status(&self) -> Option<u16> {
		match self {
			Self::Remote { status, .. } => Some(*status),
			Self::TokenAcquisition { source } => source.remote_status(),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Combined application key is not of the form `org#app`.
	#[error("Application key `{key}` must be of the form `org#app`.")]
	InvalidAppKey {
		/// Offending key.
		key: String,
	},
	/// API domain cannot be parsed or cannot carry path segments.
	#[error("API domain `{domain}` is not a valid base URL.")]
	InvalidDomain {
		/// Offending domain string.
		domain: String,
	},
	/// A required setting was left empty.
	#[error("The `{field}` setting must not be empty.")]
	MissingField {
		/// Setting name.
		field: &'static str,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Token endpoint returned an `expires_in` beyond the representable calendar range.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling Easemob.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request did not complete within the configured timeout.
	#[error("Request to Easemob timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Request could not be assembled locally, for example because a header value is invalid.
	#[error("Request to Easemob could not be built.")]
	InvalidRequest {
		/// Builder failure reported by the HTTP client.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling Easemob.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a failure to assemble the request before anything was sent.
	pub fn invalid_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidRequest { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}

/// Malformed payloads, either in a reply or while encoding a request.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Reply body is not valid JSON for the expected shape.
	#[error("Reply body could not be decoded at `{path}`.")]
	Body {
		/// JSON path where decoding stopped.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// The `entities`/`data` payload of a reply did not match the operation's shape.
	#[error("The `{field}` payload could not be decoded at `{path}`.")]
	Payload {
		/// Envelope field being decoded.
		field: &'static str,
		/// JSON path where decoding stopped.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be encoded.")]
	Encode(#[source] serde_json::Error),
}
impl DecodeError {
	pub(crate) fn body(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = err.path().to_string();

		Self::Body { path, source: err.into_inner() }
	}

	pub(crate) fn payload(
		field: &'static str,
		err: serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		let path = err.path().to_string();

		Self::Payload { field, path, source: err.into_inner() }
	}
}

/// Failures the platform reports inside an HTTP 200 reply.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum DomainError {
	/// The reply carried `result: false` (or omitted a required `result`).
	#[error("Easemob rejected the {operation} operation.")]
	Rejected {
		/// Operation label.
		operation: &'static str,
	},
	/// The reply carried no entities where at least one was expected.
	#[error("Easemob returned no entities for the {operation} operation.")]
	EmptyEntities {
		/// Operation label.
		operation: &'static str,
	},
}
