//! Media upload and image messages built on top of it.

// self
use crate::{
	_prelude::*,
	api::message::{ImageSize, MessageBody},
	client::Client,
	endpoint::NO_SEGMENTS,
	error::DomainError,
	reply::CommonReply,
};

/// Descriptor of an uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaEntity {
	/// Platform-assigned file identifier.
	pub uuid: String,
	/// Declared content type.
	#[serde(rename = "type")]
	pub kind: String,
	/// Share secret required to fetch the file.
	#[serde(rename = "share-secret")]
	pub secret: String,
	/// Fetchable URL, `{uri}/{uuid}`.
	#[serde(skip)]
	pub url: String,
}
impl MediaEntity {
	/// Extracts the first entity of an upload reply and composes its URL from the reply `uri`.
	///
	/// `fallback_uri` stands in when the reply carries no `uri`.
	pub fn from_reply(reply: &CommonReply, fallback_uri: &Url) -> Result<Self> {
		let mut entity: Self = reply.first_entity("upload_media")?;

		if entity.uuid.is_empty() {
			return Err(DomainError::EmptyEntities { operation: "upload_media" }.into());
		}

		let base = reply.uri.as_deref().unwrap_or(fallback_uri.as_str()).trim_end_matches('/');

		entity.url = format!("{base}/{}", entity.uuid);

		Ok(entity)
	}
}

impl Client {
	/// Uploads `bytes` as access-restricted media.
	pub async fn upload_media(&self, bytes: impl Into<Vec<u8>>) -> Result<MediaEntity> {
		let reply = self.upload("upload_media", bytes.into()).await?;

		MediaEntity::from_reply(&reply, &self.endpoint().path("chatfiles", NO_SEGMENTS))
	}

	/// Uploads `bytes` and wraps the result in an image message body named `{unix}.jpg`.
	pub async fn create_image_message(
		&self,
		bytes: impl Into<Vec<u8>>,
		size: ImageSize,
	) -> Result<MessageBody> {
		let entity = self.upload_media(bytes).await?;

		Ok(MessageBody::Image {
			url: entity.url,
			filename: format!("{}.jpg", OffsetDateTime::now_utc().unix_timestamp()),
			secret: entity.secret,
			size,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn fallback() -> Url {
		Url::parse("https://a1.easemob.com/acme/chat/chatfiles").expect("Fixture URL should parse.")
	}

	fn reply(raw: &str) -> CommonReply {
		serde_json::from_str(raw).expect("Reply fixture should decode.")
	}

	#[test]
	fn url_joins_reply_uri_and_uuid() {
		let reply = reply(
			"{\"uri\":\"http://x/chatfiles\",\"entities\":[{\"uuid\":\"abc\",\"type\":\"image/jpeg\",\
			 \"share-secret\":\"s1\"}]}",
		);
		let entity = MediaEntity::from_reply(&reply, &fallback()).expect("Entity should decode.");

		assert_eq!(entity.url, "http://x/chatfiles/abc");
		assert_eq!(entity.secret, "s1");
		assert_eq!(entity.kind, "image/jpeg");
	}

	#[test]
	fn trailing_slash_and_missing_uri_are_handled() {
		let slashed = reply("{\"uri\":\"http://x/chatfiles/\",\"entities\":[{\"uuid\":\"abc\"}]}");
		let bare = reply("{\"entities\":[{\"uuid\":\"abc\"}]}");

		assert_eq!(
			MediaEntity::from_reply(&slashed, &fallback()).expect("Entity should decode.").url,
			"http://x/chatfiles/abc"
		);
		assert_eq!(
			MediaEntity::from_reply(&bare, &fallback()).expect("Entity should decode.").url,
			"https://a1.easemob.com/acme/chat/chatfiles/abc"
		);
	}

	#[test]
	fn empty_upload_reply_is_a_domain_error() {
		for raw in ["{\"entities\":[]}", "{\"entities\":[{\"type\":\"image/jpeg\"}]}"] {
			let err = MediaEntity::from_reply(&reply(raw), &fallback())
				.expect_err("Reply without a uuid should fail.");

			assert!(matches!(
				err,
				Error::Domain(DomainError::EmptyEntities { operation: "upload_media" })
			));
		}
	}
}
