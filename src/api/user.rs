//! User registration and block-list management.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::Client,
	endpoint::NO_SEGMENTS,
	http::NO_BODY,
	reply::CommonReply,
};

/// Account submitted for registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
	/// Login name, unique within the application.
	pub username: String,
	/// Login password.
	pub password: TokenSecret,
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nickname: Option<String>,
}
impl User {
	/// Creates an account without a nickname.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self { username: username.into(), password: TokenSecret::new(password), nickname: None }
	}

	/// Sets the display name.
	pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
		self.nickname = Some(nickname.into());

		self
	}
}

/// Account record returned by the platform after registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisteredUser {
	/// Platform-assigned identifier.
	pub uuid: String,
	/// Entity type, `user` for accounts.
	#[serde(rename = "type")]
	pub kind: String,
	/// Creation time in milliseconds.
	pub created: i64,
	/// Last modification time in milliseconds.
	pub modified: i64,
	/// Login name.
	pub username: String,
	/// Whether the account can log in.
	pub activated: bool,
	/// Display name, when one was set.
	pub nickname: Option<String>,
}

#[derive(Serialize)]
struct BlockRequest<'a, S> {
	usernames: &'a [S],
}

impl Client {
	/// Registers one account and returns its record.
	pub async fn register_user(&self, user: &User) -> Result<RegisteredUser> {
		let url = self.endpoint().path("users", NO_SEGMENTS);
		let reply: CommonReply = self.call("register_user", Method::POST, url, Some(user)).await?;

		reply.first_entity("register_user")
	}

	/// Registers several accounts in one request.
	///
	/// Records come back in submission order.
	pub async fn register_users(&self, users: &[User]) -> Result<Vec<RegisteredUser>> {
		let url = self.endpoint().path("users", NO_SEGMENTS);
		let reply: CommonReply = self.call("register_users", Method::POST, url, Some(users)).await?;

		reply.entities()
	}

	/// Adds `usernames` to `owner`'s block list and returns the names the platform accepted.
	pub async fn block_users<S>(&self, owner: &str, usernames: &[S]) -> Result<Vec<String>>
	where
		S: Serialize,
	{
		let url = self.endpoint().path("users", &[owner, "blocks", "users"]);
		let body = BlockRequest { usernames };
		let reply: CommonReply = self.call("block_users", Method::POST, url, Some(&body)).await?;

		reply.reject_false_result("block_users")?;

		if reply.data.is_array() { reply.data_list() } else { Ok(Vec::new()) }
	}

	/// Removes `username` from `owner`'s block list.
	pub async fn unblock_user(&self, owner: &str, username: &str) -> Result<()> {
		let url = self.endpoint().path("users", &[owner, "blocks", "users", username]);
		let reply: CommonReply = self.call("unblock_user", Method::DELETE, url, NO_BODY).await?;

		reply.reject_false_result("unblock_user")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn user_serializes_without_missing_nickname() {
		let plain = serde_json::to_value(User::new("u1", "p1")).expect("User should serialize.");
		let named = serde_json::to_value(User::new("u2", "p2").nickname("Bob"))
			.expect("User should serialize.");

		assert_eq!(plain, serde_json::json!({ "username": "u1", "password": "p1" }));
		assert_eq!(
			named,
			serde_json::json!({ "username": "u2", "password": "p2", "nickname": "Bob" })
		);
	}

	#[test]
	fn registered_user_tolerates_partial_records() {
		let user: RegisteredUser = serde_json::from_str(
			"{\"uuid\":\"4b1e\",\"type\":\"user\",\"username\":\"u1\",\"activated\":true}",
		)
		.expect("Partial record should decode.");

		assert_eq!(user.kind, "user");
		assert_eq!(user.created, 0);
		assert!(user.activated);
		assert!(user.nickname.is_none());
	}

	#[test]
	fn user_debug_redacts_password() {
		let rendered = format!("{:?}", User::new("u1", "hunter2"));

		assert!(!rendered.contains("hunter2"));
	}
}
