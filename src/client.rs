//! The Easemob client: identity, token manager, and transport behind one cheap handle.

// self
use crate::{
	_prelude::*,
	auth::{TokenGrant, TokenManager, TokenRequest, TokenSecret},
	config::ClientConfig,
	endpoint::{Endpoint, NO_SEGMENTS},
	http::HttpTransport,
	obs::{self, CallKind},
	reply::CommonReply,
};

/// Authenticated entry point for every Easemob operation.
///
/// Cloning is cheap; clones share one token cache so a refreshed token is visible to all of
/// them. Domain operations live in [`crate::api`] as inherent methods on this type.
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}
struct ClientInner {
	config: ClientConfig,
	endpoint: Endpoint,
	transport: HttpTransport,
	tokens: TokenManager,
}
impl Client {
	/// Creates a client from a validated configuration.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let transport = HttpTransport::new(&config)?;

		Self::with_transport(config, transport)
	}

	/// Creates a client that reuses a caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: HttpTransport) -> Result<Self> {
		let endpoint = Endpoint::new(&config.api_domain, &config.app_key)?;
		let inner = ClientInner { config, endpoint, transport, tokens: TokenManager::new() };

		Ok(Self { inner: Arc::new(inner) })
	}

	/// Shorthand for [`ClientConfig::builder`] with every other setting left at its default.
	pub fn from_credentials(
		app_key: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self> {
		let config = ClientConfig::builder(app_key, client_id, client_secret).build()?;

		Self::new(config)
	}

	/// Configuration the client was built from.
	pub fn config(&self) -> &ClientConfig {
		&self.inner.config
	}

	/// Resource URI resolver for this client's application.
	pub fn endpoint(&self) -> &Endpoint {
		&self.inner.endpoint
	}

	/// Token cache owned by this client.
	pub fn tokens(&self) -> &TokenManager {
		&self.inner.tokens
	}

	/// Returns a bearer token valid now, acquiring one if the cache is empty or expired.
	pub async fn access_token(&self) -> Result<TokenSecret> {
		self.access_token_at(OffsetDateTime::now_utc()).await
	}

	/// Same as [`access_token`](Self::access_token) with an explicit clock instant.
	pub async fn access_token_at(&self, now: OffsetDateTime) -> Result<TokenSecret> {
		self.inner.tokens.access_token_at(now, || self.request_token()).await
	}

	/// Performs an authenticated JSON call against `url`.
	///
	/// `stage` labels the call in spans and metrics.
	pub async fn call<B, T>(
		&self,
		stage: &'static str,
		method: Method,
		url: Url,
		body: Option<&B>,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		obs::observe(CallKind::Api, stage, async move {
			let token = self.access_token().await?;

			self.inner.transport.call(method, url, body, Some(&token)).await
		})
		.await
	}

	/// Uploads `bytes` to the `chatfiles` resource and returns the raw reply envelope.
	pub async fn upload(&self, stage: &'static str, bytes: Vec<u8>) -> Result<CommonReply> {
		obs::observe(CallKind::Upload, stage, async move {
			let token = self.access_token().await?;
			let url = self.inner.endpoint.path("chatfiles", NO_SEGMENTS);

			self.inner.transport.upload(url, bytes, &token).await
		})
		.await
	}

	async fn request_token(&self) -> Result<TokenGrant> {
		obs::observe(CallKind::Token, "request_token", async {
			let config = &self.inner.config;
			let body = TokenRequest::client_credentials(&config.client_id, &config.client_secret);
			let url = self.inner.endpoint.path("token", NO_SEGMENTS);

			self.inner.transport.call(Method::POST, url, Some(&body), None).await
		})
		.await
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("app_key", &self.inner.config.app_key)
			.field("endpoint", &self.inner.endpoint.base().as_str())
			.field("tokens", &self.inner.tokens)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	use parking_lot::Mutex;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		obs::{RequestSnapshot, RequestTrace},
	};

	#[derive(Default)]
	struct Recorder(Mutex<Vec<String>>);
	impl RequestTrace for Recorder {
		fn on_request(&self, request: &RequestSnapshot<'_>) {
			self.0.lock().push(format!(
				"{} {} {:?} {}",
				request.method,
				request.url.path(),
				request.redacted_headers(),
				request.redacted_body().unwrap_or_default()
			));
		}
	}

	#[tokio::test]
	async fn access_token_is_cached_per_client() {
		let server = MockServer::start_async().await;
		let token = server
			.mock_async(|when, then| {
				when.method(POST).path("/acme/chat/token");
				then.status(200)
					.header("content-type", "application/json")
					.body("{\"access_token\":\"tok-1\",\"expires_in\":60}");
			})
			.await;
		let client = build_test_client(&server.base_url());

		for _ in 0..2 {
			let token = client.access_token().await.expect("Token request should succeed.");

			assert_eq!(token.expose(), "tok-1");
		}

		let cached = client.tokens().cached().expect("Token should be cached.");

		assert_eq!(cached.expires_at - cached.issued_at, Duration::seconds(60));

		token.assert_calls_async(1).await;
	}

	#[tokio::test]
	async fn trace_hook_sees_requests_without_secrets() {
		let server = MockServer::start_async().await;

		server
			.mock_async(|when, then| {
				when.method(POST).path("/acme/chat/token");
				then.status(200)
					.header("content-type", "application/json")
					.body("{\"access_token\":\"tok-secret\",\"expires_in\":60}");
			})
			.await;
		server
			.mock_async(|when, then| {
				when.method(POST).path("/acme/chat/chatgroups/g1/users/u1");
				then.status(200)
					.header("content-type", "application/json")
					.body("{\"data\":{\"result\":true}}");
			})
			.await;

		let recorder = Arc::new(Recorder::default());
		let config = ClientConfig::builder(TEST_APP_KEY, TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.api_domain(server.base_url())
			.accept_invalid_certs(true)
			.trace(recorder.clone())
			.build()
			.expect("Config fixture should validate.");
		let client = Client::new(config).expect("Client should build.");

		client.add_group_member("g1", "u1").await.expect("Membership call should succeed.");

		let seen = recorder.0.lock();

		assert_eq!(seen.len(), 2);
		assert!(seen[0].starts_with("POST /acme/chat/token"));
		assert!(seen[1].starts_with("POST /acme/chat/chatgroups/g1/users/u1"));
		assert!(seen.iter().all(|line| !line.contains(TEST_CLIENT_SECRET)));
		assert!(seen.iter().all(|line| !line.contains("tok-secret")));
	}

	#[test]
	fn client_debug_hides_credentials() {
		let client = build_test_client("https://a1.easemob.com");
		let rendered = format!("{client:?}");

		assert!(rendered.contains("acme"));
		assert!(!rendered.contains(TEST_CLIENT_SECRET));
	}

	#[test]
	fn invalid_app_key_fails_construction() {
		let err = Client::from_credentials("no-delimiter", "id", "secret")
			.expect_err("App key without `#` should be rejected.");

		assert!(matches!(err, Error::Config(_)));
	}
}
