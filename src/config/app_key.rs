//! Combined `org#app` application key parsing.

// self
use crate::{_prelude::*, error::ConfigError};

/// Organization + application pair split from a combined Easemob app key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppKey {
	org_name: String,
	app_name: String,
}
impl AppKey {
	/// Separator between the organization and application halves.
	pub const DELIMITER: char = '#';

	/// Parses `org#app`; both halves must be non-empty and the delimiter must appear once.
	pub fn parse(key: impl AsRef<str>) -> Result<Self, ConfigError> {
		let key = key.as_ref();
		let invalid = || ConfigError::InvalidAppKey { key: key.to_owned() };
		let (org_name, app_name) = key.split_once(Self::DELIMITER).ok_or_else(invalid)?;

		if org_name.is_empty() || app_name.is_empty() || app_name.contains(Self::DELIMITER) {
			return Err(invalid());
		}

		Ok(Self { org_name: org_name.to_owned(), app_name: app_name.to_owned() })
	}

	/// Organization half of the key.
	pub fn org_name(&self) -> &str {
		&self.org_name
	}

	/// Application half of the key.
	pub fn app_name(&self) -> &str {
		&self.app_name
	}
}
impl Debug for AppKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "AppKey({self})")
	}
}
impl Display for AppKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}{}{}", self.org_name, Self::DELIMITER, self.app_name)
	}
}
impl FromStr for AppKey {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}
impl TryFrom<String> for AppKey {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(value)
	}
}
impl From<AppKey> for String {
	fn from(value: AppKey) -> Self {
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parse_splits_org_and_app() {
		let key = AppKey::parse("acme#chat").expect("Well-formed app key should parse.");

		assert_eq!(key.org_name(), "acme");
		assert_eq!(key.app_name(), "chat");
		assert_eq!(key.to_string(), "acme#chat");
	}

	#[test]
	fn parse_rejects_malformed_keys() {
		for raw in ["acme", "#chat", "acme#", "#", "", "acme#chat#extra"] {
			let err = AppKey::parse(raw).expect_err("Malformed app key should be rejected.");

			assert!(
				matches!(&err, ConfigError::InvalidAppKey { key } if key == raw),
				"Unexpected error for {raw:?}: {err:?}."
			);
		}
	}

	#[test]
	fn serde_enforces_validation() {
		let key: AppKey =
			serde_json::from_str("\"acme#chat\"").expect("App key should deserialize.");

		assert_eq!(key.app_name(), "chat");
		assert!(serde_json::from_str::<AppKey>("\"acme\"").is_err());
		assert_eq!(
			serde_json::to_string(&key).expect("App key should serialize."),
			"\"acme#chat\""
		);
	}
}
