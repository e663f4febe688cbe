//! Group membership.

// self
use crate::{_prelude::*, client::Client, http::NO_BODY, reply::CommonReply};

impl Client {
	/// Adds `user` to `group`.
	///
	/// The platform must confirm with `data.result == true`; anything else, including a missing
	/// flag, is reported as [`DomainError::Rejected`](crate::error::DomainError::Rejected).
	pub async fn add_group_member(&self, group: &str, user: &str) -> Result<()> {
		let url = self.endpoint().path("chatgroups", &[group, "users", user]);
		let reply: CommonReply =
			self.call("add_group_member", Method::POST, url, NO_BODY).await?;

		reply.require_true_result("add_group_member")
	}
}
