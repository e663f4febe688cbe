//! Credential strings that serialize as-is on the wire but never print.

// self
use crate::_prelude::*;

/// Bearer token, client secret, or user password.
///
/// Serializes as the plain string the Easemob API expects; `Debug` and `Display` print
/// `<redacted>`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a credential string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw value for request bodies and the `Authorization` header.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` for an empty string, which never authenticates.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn secret_serializes_as_plain_string() {
		let secret = TokenSecret::new("wire-value");

		assert_eq!(
			serde_json::to_string(&secret).expect("Secrets should serialize."),
			"\"wire-value\""
		);
	}

	#[test]
	fn password_inside_user_payload_stays_on_the_wire_but_not_in_logs() {
		let payload = BTreeMap::from([("password", TokenSecret::new("hunter2"))]);

		assert_eq!(
			serde_json::to_string(&payload).expect("Payload should serialize."),
			"{\"password\":\"hunter2\"}"
		);
		assert!(!format!("{payload:?}").contains("hunter2"));
	}
}
