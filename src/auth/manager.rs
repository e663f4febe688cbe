//! Lazily refreshed bearer token cache with a single-flight guard.
//!
//! [`TokenManager`] hands out the cached token while it is valid and only calls the
//! acquisition closure when the cache is empty or expired. Concurrent callers that find a
//! stale cache queue on one async mutex; the first one refreshes and the rest re-check the
//! cache after the guard is released, so a burst of stale callers produces one token call.
//! Acquisition failures propagate as [`Error::TokenAcquisition`] and leave the cache as it
//! was.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenGrant, TokenSecret},
};

/// Owner of one client's cached credential.
#[derive(Default)]
pub struct TokenManager {
	cached: RwLock<Option<Credential>>,
	refresh_guard: AsyncMutex<()>,
}
impl TokenManager {
	/// Creates an empty manager.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the cached credential, if any.
	pub fn cached(&self) -> Option<Credential> {
		self.cached.read().clone()
	}

	/// Replaces the cached credential.
	pub fn install(&self, credential: Credential) {
		*self.cached.write() = Some(credential);
	}

	/// Drops the cached credential so the next call refreshes.
	pub fn invalidate(&self) {
		self.cached.write().take();
	}

	/// Returns a token valid at `now`, calling `acquire` at most once when the cache is stale.
	pub async fn access_token_at<F, Fut>(
		&self,
		now: OffsetDateTime,
		acquire: F,
	) -> Result<TokenSecret>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<TokenGrant>>,
	{
		if let Some(token) = self.valid_token(now) {
			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;

		if let Some(token) = self.valid_token(now) {
			return Ok(token);
		}

		let grant = acquire().await.map_err(Error::token_acquisition)?;
		let credential = Credential::from_grant(grant, now)
			.map_err(|e| Error::token_acquisition(e.into()))?;
		let token = credential.access_token.clone();

		#[cfg(feature = "tracing")]
		tracing::debug!(expires_at = %credential.expires_at, "cached new Easemob access token");

		self.install(credential);

		Ok(token)
	}

	fn valid_token(&self, now: OffsetDateTime) -> Option<TokenSecret> {
		self.cached
			.read()
			.as_ref()
			.filter(|credential| credential.is_valid_at(now))
			.map(|credential| credential.access_token.clone())
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("expires_at", &self.cached.read().as_ref().map(|c| c.expires_at))
			.finish()
	}
}
