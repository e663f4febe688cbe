//! Bearer credential lifecycle and the token endpoint wire shapes.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Grant type sent to the token endpoint.
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// JSON body of the token endpoint request.
#[derive(Clone, Debug, Serialize)]
pub struct TokenRequest<'a> {
	/// Always [`CLIENT_CREDENTIALS_GRANT`].
	pub grant_type: &'static str,
	/// Client identifier.
	pub client_id: &'a str,
	/// Client secret.
	pub client_secret: &'a TokenSecret,
}
impl<'a> TokenRequest<'a> {
	/// Builds a client-credentials request body.
	pub fn client_credentials(client_id: &'a str, client_secret: &'a TokenSecret) -> Self {
		Self { grant_type: CLIENT_CREDENTIALS_GRANT, client_id, client_secret }
	}
}

/// Token endpoint reply.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
	/// Issued bearer token.
	pub access_token: TokenSecret,
	/// Lifetime in seconds.
	pub expires_in: i64,
	/// Application UUID echoed by the platform.
	#[serde(default)]
	pub application: Option<String>,
}

/// Cached bearer token plus the instant it stops being usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	/// Bearer token; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant the grant was received.
	pub issued_at: OffsetDateTime,
	/// First instant at which the token is no longer valid.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Creates a credential valid for `expires_in` from `issued_at`.
	pub fn new(
		access_token: TokenSecret,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Result<Self, ConfigError> {
		if !expires_in.is_positive() {
			return Err(ConfigError::NonPositiveExpiresIn);
		}

		let expires_at =
			issued_at.checked_add(expires_in).ok_or(ConfigError::ExpiresInOutOfRange)?;

		Ok(Self { access_token, issued_at, expires_at })
	}

	/// Converts a token endpoint reply received at `issued_at`.
	pub fn from_grant(grant: TokenGrant, issued_at: OffsetDateTime) -> Result<Self, ConfigError> {
		Self::new(grant.access_token, issued_at, Duration::seconds(grant.expires_in))
	}

	/// A credential is valid while it holds a token and `instant` is strictly before expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		!self.access_token.is_empty() && instant < self.expires_at
	}

	/// Inverse of [`is_valid_at`](Self::is_valid_at).
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		!self.is_valid_at(instant)
	}

	/// Time left before expiry at `instant`, clamped to zero.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
