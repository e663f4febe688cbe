//! Client configuration: identity, API domain, and transport knobs.
//!
//! Build a [`ClientConfig`] in code with [`ClientConfig::builder`] or deserialize a
//! [`ClientSettings`] (for example from a TOML/JSON file or environment-driven loader) and
//! convert it with [`ClientConfig::try_from`].

/// Combined application key parsing.
pub mod app_key;
/// Builder API for assembling client configurations.
pub mod builder;

pub use app_key::*;
pub use builder::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError, obs::RequestTrace};

/// Validated configuration consumed by [`Client`](crate::client::Client).
#[derive(Clone)]
pub struct ClientConfig {
	/// Organization + application identity.
	pub app_key: AppKey,
	/// Client identifier used for the client-credentials grant.
	pub client_id: String,
	/// Client secret used for the client-credentials grant.
	pub client_secret: TokenSecret,
	/// Base URL every resource path is appended to.
	pub api_domain: Url,
	/// Overall per-request timeout.
	pub timeout: StdDuration,
	/// Skips TLS certificate validation when true.
	pub accept_invalid_certs: bool,
	/// Hook invoked with every outgoing request.
	pub trace: Arc<dyn RequestTrace>,
}
impl ClientConfig {
	/// Default Easemob REST domain.
	pub const DEFAULT_API_DOMAIN: &'static str = "https://a1.easemob.com";
	/// Default overall request timeout.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Creates a new builder for the provided identity.
	pub fn builder(
		app_key: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(app_key, client_id, client_secret)
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("app_key", &self.app_key)
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("api_domain", &self.api_domain.as_str())
			.field("timeout", &self.timeout)
			.field("accept_invalid_certs", &self.accept_invalid_certs)
			.finish()
	}
}
impl TryFrom<ClientSettings> for ClientConfig {
	type Error = ConfigError;

	fn try_from(settings: ClientSettings) -> Result<Self, Self::Error> {
		let mut builder =
			Self::builder(settings.app_key, settings.client_id, settings.client_secret)
				.accept_invalid_certs(settings.accept_invalid_certs);

		if let Some(domain) = settings.api_domain {
			builder = builder.api_domain(domain);
		}
		if let Some(secs) = settings.timeout_secs {
			builder = builder.timeout(StdDuration::from_secs(secs));
		}

		builder.build()
	}
}

/// Serializable settings mirror of [`ClientConfig`] for file or environment loaders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
	/// Combined `org#app` key.
	pub app_key: String,
	/// Client identifier.
	pub client_id: String,
	/// Client secret.
	pub client_secret: String,
	/// Optional API domain override.
	#[serde(default)]
	pub api_domain: Option<String>,
	/// Optional timeout override in seconds.
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	/// Opt-in TLS relaxation.
	#[serde(default)]
	pub accept_invalid_certs: bool,
}
