// std
use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::{AppKey, ClientConfig},
	error::ConfigError,
	obs::{LogTrace, RequestTrace},
};

/// Builder for [`ClientConfig`] values.
pub struct ClientConfigBuilder {
	/// Raw combined application key, validated at [`build`](Self::build).
	pub app_key: String,
	/// Client identifier.
	pub client_id: String,
	/// Client secret.
	pub client_secret: String,
	/// Optional API domain override.
	pub api_domain: Option<String>,
	/// Overall per-request timeout.
	pub timeout: StdDuration,
	/// Opt-in TLS relaxation.
	pub accept_invalid_certs: bool,
	/// Optional request trace hook; defaults to [`LogTrace`].
	pub trace: Option<Arc<dyn RequestTrace>>,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided identity.
	pub fn new(
		app_key: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Self {
		Self {
			app_key: app_key.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			api_domain: None,
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			accept_invalid_certs: false,
			trace: None,
		}
	}

	/// Overrides the API domain (defaults to [`ClientConfig::DEFAULT_API_DOMAIN`]).
	pub fn api_domain(mut self, domain: impl Into<String>) -> Self {
		self.api_domain = Some(domain.into());

		self
	}

	/// Overrides the overall request timeout (defaults to 30 seconds).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Disables TLS certificate validation when `enabled` is true.
	///
	/// Only use this against endpoints you control; the connection is no longer protected
	/// against interception.
	pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
		self.accept_invalid_certs = enabled;

		self
	}

	/// Replaces the request trace hook.
	pub fn trace(mut self, trace: Arc<dyn RequestTrace>) -> Self {
		self.trace = Some(trace);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let app_key = AppKey::parse(&self.app_key)?;

		if self.client_id.is_empty() {
			return Err(ConfigError::MissingField { field: "client_id" });
		}
		if self.client_secret.is_empty() {
			return Err(ConfigError::MissingField { field: "client_secret" });
		}

		let domain = self.api_domain.as_deref().unwrap_or(ClientConfig::DEFAULT_API_DOMAIN);
		let api_domain = parse_domain(domain)?;

		Ok(ClientConfig {
			app_key,
			client_id: self.client_id,
			client_secret: TokenSecret::new(self.client_secret),
			api_domain,
			timeout: self.timeout,
			accept_invalid_certs: self.accept_invalid_certs,
			trace: self.trace.unwrap_or_else(|| Arc::new(LogTrace)),
		})
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("app_key", &self.app_key)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("api_domain", &self.api_domain)
			.field("timeout", &self.timeout)
			.field("accept_invalid_certs", &self.accept_invalid_certs)
			.field("trace_set", &self.trace.is_some())
			.finish()
	}
}

fn parse_domain(domain: &str) -> Result<Url, ConfigError> {
	let invalid = || ConfigError::InvalidDomain { domain: domain.to_owned() };
	let url = Url::parse(domain).map_err(|_| invalid())?;

	if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
		return Err(invalid());
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(invalid());
	}

	Ok(url)
}
