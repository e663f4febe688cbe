//! Registers a user, adds them to a group, and sends them a text message against a mock
//! Easemob server, reusing a single cached access token for every call.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use easemob_sdk::{
	api::{Message, MessageBody, TargetType, User},
	client::Client,
	config::ClientConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"expires_in\":900}");
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/users");
			then.status(200).header("content-type", "application/json").body(
				"{\"entities\":[{\"uuid\":\"7f0c\",\"type\":\"user\",\"username\":\"alice\",\
				 \"activated\":true}]}",
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/chatgroups/team/users/alice");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":{\"result\":true}}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/messages");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":{\"alice\":\"success\"}}");
		})
		.await;

	let config = ClientConfig::builder("acme#chat", "demo-client", "super-secret")
		.api_domain(server.base_url())
		.accept_invalid_certs(true)
		.build()?;
	let client = Client::new(config)?;
	let user = client.register_user(&User::new("alice", "s3cret").nickname("Alice")).await?;

	println!("Registered {} as {}.", user.username, user.uuid);

	client.add_group_member("team", &user.username).await?;

	let message = Message::new(TargetType::Users, [user.username], MessageBody::text("welcome"))
		.sender("admin");
	let delivery = client.send_message(&message).await?;

	println!("Delivery status: {delivery:?}.");

	token_mock.assert_calls_async(1).await;

	Ok(())
}
