// std
use std::{
	io::{Read, Write},
	net::TcpListener,
	sync::Arc,
	thread,
	time::Duration as StdDuration,
};
// crates.io
use httpmock::prelude::*;
use time::{Duration, OffsetDateTime};
// self
use easemob_sdk::{
	api::{ImageSize, MessageBody},
	auth::{Credential, TokenSecret},
	client::Client,
	config::ClientConfig,
	error::Error,
	obs::NoopTrace,
};

const UPLOAD_REPLY: &str = "{\"uri\":\"http://x/chatfiles\",\"entities\":[{\"uuid\":\"abc\",\
							\"type\":\"image/jpeg\",\"share-secret\":\"s1\"}]}";

fn build_client(server: &MockServer) -> Client {
	let config = ClientConfig::builder("acme#chat", "client-id", "client-secret")
		.api_domain(server.base_url())
		.accept_invalid_certs(true)
		.trace(Arc::new(NoopTrace))
		.build()
		.expect("Client configuration should validate.");

	Client::new(config).expect("Client should build against the mock server.")
}

async fn mock_token(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"tok-1\",\"expires_in\":3600}");
		})
		.await;
}

#[tokio::test]
async fn upload_sends_single_unnamed_file_part() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let upload = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/acme/chat/chatfiles")
				.header("authorization", "Bearer tok-1")
				.header("restrict-access", "true")
				.body_includes(
					"Content-Disposition: form-data; name=\"file\"\r\n\r\nimage-bytes\r\n",
				);
			then.status(200).header("content-type", "application/json").body(UPLOAD_REPLY);
		})
		.await;
	let entity = build_client(&server)
		.upload_media(b"image-bytes".to_vec())
		.await
		.expect("Upload should succeed.");

	assert_eq!(entity.uuid, "abc");
	assert_eq!(entity.kind, "image/jpeg");
	assert_eq!(entity.secret, "s1");
	assert_eq!(entity.url, "http://x/chatfiles/abc");

	upload.assert_async().await;
}

/// Accepts one connection, answers it with `reply`, and returns the raw request text.
fn capture_one_request(listener: TcpListener, reply: &'static str) -> thread::JoinHandle<String> {
	thread::spawn(move || {
		let (mut stream, _) = listener.accept().expect("Upload request should connect.");
		let mut raw = Vec::new();
		let mut chunk = [0_u8; 4096];

		stream
			.set_read_timeout(Some(StdDuration::from_secs(5)))
			.expect("Read timeout should apply.");

		while !raw.ends_with(b"--\r\n") {
			let read = stream.read(&mut chunk).expect("Upload request should be readable.");

			if read == 0 {
				break;
			}

			raw.extend_from_slice(&chunk[..read]);
		}

		let response = format!(
			"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
			 connection: close\r\n\r\n{reply}",
			reply.len()
		);

		stream.write_all(response.as_bytes()).expect("Reply should be writable.");

		String::from_utf8_lossy(&raw).into_owned()
	})
}

#[tokio::test]
async fn upload_body_holds_exactly_one_part_without_filename() {
	let listener = TcpListener::bind("127.0.0.1:0").expect("Loopback listener should bind.");
	let domain = format!("http://{}", listener.local_addr().expect("Listener has an address."));
	let captured = capture_one_request(listener, UPLOAD_REPLY);
	let config = ClientConfig::builder("acme#chat", "client-id", "client-secret")
		.api_domain(domain)
		.trace(Arc::new(NoopTrace))
		.build()
		.expect("Client configuration should validate.");
	let client = Client::new(config).expect("Client should build.");
	let credential =
		Credential::new(TokenSecret::new("tok-1"), OffsetDateTime::now_utc(), Duration::hours(1))
			.expect("Fixture credential should build.");

	client.tokens().install(credential);
	client.upload_media(b"image-bytes".to_vec()).await.expect("Upload should succeed.");

	let raw = captured.join().expect("Capture thread should finish.");
	let lowered = raw.to_ascii_lowercase();

	assert!(raw.starts_with("POST /acme/chat/chatfiles "), "{raw}");
	assert_eq!(lowered.matches("content-disposition:").count(), 1, "{raw}");
	assert!(!lowered.contains("filename"), "{raw}");
	assert!(raw.contains("name=\"file\"\r\n\r\nimage-bytes\r\n"), "{raw}");
	assert!(lowered.contains("restrict-access: true"), "{raw}");
	assert!(lowered.contains("authorization: bearer tok-1"), "{raw}");
}

#[tokio::test]
async fn image_message_carries_uploaded_media() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/chatfiles");
			then.status(200).header("content-type", "application/json").body(UPLOAD_REPLY);
		})
		.await;

	let size = ImageSize { width: 640, height: 480 };
	let body = build_client(&server)
		.create_image_message(b"jpeg".to_vec(), size)
		.await
		.expect("Image message should be created.");

	match body {
		MessageBody::Image { url, filename, secret, size: got } => {
			assert_eq!(url, "http://x/chatfiles/abc");
			assert_eq!(secret, "s1");
			assert_eq!(got, size);
			assert!(filename.ends_with(".jpg"), "{filename}");
			assert!(filename.trim_end_matches(".jpg").parse::<i64>().is_ok(), "{filename}");
		},
		other => panic!("Unexpected message body: {other:?}."),
	}
}

#[tokio::test]
async fn upload_rejection_keeps_status_and_body() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/acme/chat/chatfiles");
			then.status(413).body("{\"error\":\"file_too_large\"}");
		})
		.await;

	let err = build_client(&server)
		.upload_media(vec![0_u8; 16])
		.await
		.expect_err("A 413 reply should fail.");

	assert_eq!(err.remote_status(), Some(413));
	assert!(matches!(
		err,
		Error::Remote { ref body, .. } if body == "{\"error\":\"file_too_large\"}"
	));
}
