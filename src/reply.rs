//! Generic reply envelope returned by nearly every Easemob endpoint.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::{DecodeError, DomainError},
};

/// Envelope whose `entities` and `data` payloads need a second, operation-specific decode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonReply {
	/// HTTP verb echoed by the platform.
	pub action: Option<String>,
	/// Application UUID.
	pub application: Option<String>,
	/// Query parameters echoed by the platform.
	pub params: Value,
	/// Resource path.
	pub path: Option<String>,
	/// Base URI of the resource collection.
	pub uri: Option<String>,
	/// Raw entity list.
	pub entities: Value,
	/// Raw operation data.
	pub data: Value,
	/// Server timestamp in milliseconds.
	pub timestamp: Option<i64>,
	/// Server processing time in milliseconds.
	pub duration: Option<i64>,
	/// Organization name.
	pub organization: Option<String>,
	/// Application name.
	#[serde(rename = "applicationName")]
	pub application_name: Option<String>,
}
impl CommonReply {
	/// Decodes `entities` into `T`; a missing field decodes as an empty list.
	pub fn entities<T>(&self) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		decode_payload("entities", &self.entities)
	}

	/// Decodes `entities` and requires at least one element, returning the first.
	pub fn first_entity<T>(&self, operation: &'static str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.entities()?
			.into_iter()
			.next()
			.ok_or_else(|| DomainError::EmptyEntities { operation }.into())
	}

	/// Decodes `data` into `T`.
	pub fn data<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode_value("data", self.data.clone())
	}

	/// Decodes `data` as a list; a missing field decodes as an empty list.
	pub fn data_list<T>(&self) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		decode_payload("data", &self.data)
	}

	/// Returns the `data.result` flag, if present.
	pub fn result_flag(&self) -> Option<bool> {
		self.data.get("result").and_then(Value::as_bool)
	}

	/// Fails with [`DomainError::Rejected`] when `data.result` is explicitly `false`.
	pub fn reject_false_result(&self, operation: &'static str) -> Result<()> {
		match self.result_flag() {
			Some(false) => Err(DomainError::Rejected { operation }.into()),
			_ => Ok(()),
		}
	}

	/// Fails with [`DomainError::Rejected`] unless `data.result` is `true`.
	pub fn require_true_result(&self, operation: &'static str) -> Result<()> {
		match self.result_flag() {
			Some(true) => Ok(()),
			_ => Err(DomainError::Rejected { operation }.into()),
		}
	}
}

fn decode_payload<T>(field: &'static str, value: &Value) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	if value.is_null() {
		return Ok(Vec::new());
	}

	decode_value(field, value.clone())
}

fn decode_value<T>(field: &'static str, value: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value).map_err(|e| DecodeError::payload(field, e).into())
}
