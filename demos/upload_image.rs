//! Uploads an image to a mock Easemob server and sends it to a chat group as an image message.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use easemob_sdk::{
	api::{ImageSize, Message, TargetType},
	client::Client,
	config::ClientConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\",\"expires_in\":900}");
		})
		.await;

	let upload_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/chatfiles").header("restrict-access", "true");
			then.status(200).header("content-type", "application/json").body(format!(
				"{{\"uri\":\"{}\",\"entities\":[{{\"uuid\":\"5ce1\",\"type\":\"chatfile\",\
				 \"share-secret\":\"XCd3\"}}]}}",
				server.url("/acme/chat/chatfiles")
			));
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/messages");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":{\"team\":\"success\"}}");
		})
		.await;

	let config = ClientConfig::builder("acme#chat", "demo-client", "super-secret")
		.api_domain(server.base_url())
		.accept_invalid_certs(true)
		.build()?;
	let client = Client::new(config)?;
	let size = ImageSize { width: 64, height: 64 };
	let body = client.create_image_message(b"\xFF\xD8\xFF\xE0 demo jpeg".to_vec(), size).await?;

	println!("Image message body: {}.", serde_json::to_string(&body)?);

	client.send_message(&Message::new(TargetType::Chatgroups, ["team"], body)).await?;

	upload_mock.assert_async().await;

	Ok(())
}
