//! Server-side Easemob IM SDK: client-credentials auth with single-flight token caching and
//! typed user, group, message, and media operations over reqwest.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod reply;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{client::Client, config::ClientConfig};

	/// App key shared by integration tests.
	pub const TEST_APP_KEY: &str = "acme#chat";
	/// Client identifier shared by integration tests.
	pub const TEST_CLIENT_ID: &str = "client-id";
	/// Client secret shared by integration tests.
	pub const TEST_CLIENT_SECRET: &str = "client-secret";

	/// Builds a [`Client`] pointed at `api_domain` that accepts the self-signed certificates
	/// produced by `httpmock` during tests.
	pub fn build_test_client(api_domain: &str) -> Client {
		let config = ClientConfig::builder(TEST_APP_KEY, TEST_CLIENT_ID, TEST_CLIENT_SECRET)
			.api_domain(api_domain)
			.accept_invalid_certs(true)
			.build()
			.expect("Test client configuration should be valid.");

		Client::new(config).expect("Failed to build insecure Easemob client for tests.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method, StatusCode};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
