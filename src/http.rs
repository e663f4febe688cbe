//! Transport primitives for Easemob REST exchanges.
//!
//! [`HttpTransport`] wraps a [`ReqwestClient`] and maps every exchange to either a decoded
//! reply or an SDK [`Error`]: network failures become [`Error::Transport`], any status other
//! than 200 becomes [`Error::Remote`] with the body preserved, and undecodable 200 bodies
//! become [`Error::Decode`]. Each request is shown to the configured
//! [`RequestTrace`] hook right before it is sent.

// crates.io
use reqwest::{
	RequestBuilder,
	header::CONTENT_TYPE,
	multipart::{Form, Part},
	redirect::Policy,
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::ClientConfig,
	error::{ConfigError, DecodeError, TransportError},
	obs::{RequestSnapshot, RequestTrace},
};

/// Placeholder body for requests without one.
pub const NO_BODY: Option<&()> = None;
/// Multipart field name the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";
/// Header that marks uploaded media as access-restricted.
pub const RESTRICT_ACCESS_HEADER: &str = "restrict-access";

/// Thin wrapper around [`ReqwestClient`] so request shaping and status mapping live in one
/// place.
#[derive(Clone)]
pub struct HttpTransport {
	client: ReqwestClient,
	trace: Arc<dyn RequestTrace>,
}
impl HttpTransport {
	/// Builds a reqwest client from the timeout and TLS settings in `config`.
	///
	/// Redirects are not followed; the platform answers resource calls directly.
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.danger_accept_invalid_certs(config.accept_invalid_certs)
			.redirect(Policy::none())
			.build()?;

		Ok(Self::with_client(client, config.trace.clone()))
	}

	/// Wraps an existing reqwest client.
	pub fn with_client(client: ReqwestClient, trace: Arc<dyn RequestTrace>) -> Self {
		Self { client, trace }
	}

	/// Performs one JSON exchange.
	///
	/// A present `body` is serialized as JSON with `Content-Type: application/json`; a present
	/// `bearer` is sent as `Authorization: Bearer {token}`.
	pub async fn call<B, T>(
		&self,
		method: Method,
		url: Url,
		body: Option<&B>,
		bearer: Option<&TokenSecret>,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let mut builder = self.client.request(method, url);

		if let Some(body) = body {
			let payload = serde_json::to_vec(body).map_err(DecodeError::Encode)?;

			builder = builder.header(CONTENT_TYPE, "application/json").body(payload);
		}
		if let Some(token) = bearer {
			builder = builder.bearer_auth(token.expose());
		}

		self.execute(builder).await
	}

	/// Uploads `bytes` as the single multipart part named [`UPLOAD_FIELD`], without a
	/// filename, flagged as access-restricted.
	pub async fn upload<T>(&self, url: Url, bytes: Vec<u8>, bearer: &TokenSecret) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let form = Form::new().part(UPLOAD_FIELD, Part::bytes(bytes));
		let builder = self
			.client
			.post(url)
			.bearer_auth(bearer.expose())
			.header(RESTRICT_ACCESS_HEADER, "true")
			.multipart(form);

		self.execute(builder).await
	}

	async fn execute<T>(&self, builder: RequestBuilder) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = builder.build().map_err(TransportError::invalid_request)?;

		self.trace.on_request(&RequestSnapshot::of(&request));

		let response = self.client.execute(request).await.map_err(TransportError::from)?;
		let status = response.status();
		let bytes = response.bytes().await.map_err(TransportError::from)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(%status, len = bytes.len(), "received Easemob response");

		if status != StatusCode::OK {
			return Err(Error::Remote {
				status: status.as_u16(),
				body: String::from_utf8_lossy(&bytes).into_owned(),
			});
		}

		decode_body(&bytes)
	}
}
impl Debug for HttpTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpTransport").field("client", &self.client).finish_non_exhaustive()
	}
}

/// Decodes a 200 reply body, reporting the JSON path on failure.
pub fn decode_body<T>(bytes: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(bytes);
	let value = serde_path_to_error::deserialize(&mut de).map_err(DecodeError::body)?;

	de.end().map_err(|source| DecodeError::Body { path: ".".into(), source })?;

	Ok(value)
}
