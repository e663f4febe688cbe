//! Message delivery and hourly chat-log export.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	client::Client,
	endpoint::NO_SEGMENTS,
	http::NO_BODY,
	reply::CommonReply,
};

/// Recipient collection a message is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
	/// Individual users.
	Users,
	/// Chat groups.
	Chatgroups,
	/// Chat rooms.
	Chatrooms,
}

/// Pixel dimensions of an image message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}

/// Message content, tagged by `type` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MessageBody {
	/// Plain text.
	#[serde(rename = "txt")]
	Text {
		/// Text content.
		msg: String,
	},
	/// Pass-through command, not shown to the recipient.
	#[serde(rename = "cmd")]
	Command {
		/// Command name.
		action: String,
	},
	/// Image previously uploaded to `chatfiles`.
	#[serde(rename = "img")]
	Image {
		/// Media URL.
		url: String,
		/// File name shown to the recipient.
		filename: String,
		/// Share secret required to fetch the media.
		secret: String,
		/// Image dimensions.
		size: ImageSize,
	},
}
impl MessageBody {
	/// Text message.
	pub fn text(msg: impl Into<String>) -> Self {
		Self::Text { msg: msg.into() }
	}

	/// Command message.
	pub fn command(action: impl Into<String>) -> Self {
		Self::Command { action: action.into() }
	}
}

/// Outbound message.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
	/// Recipient collection.
	pub target_type: TargetType,
	/// Recipient identifiers.
	pub target: Vec<String>,
	/// Sender; the platform uses `admin` when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from: Option<String>,
	/// Content.
	pub msg: MessageBody,
	/// Application-defined extension attributes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ext: Option<Value>,
}
impl Message {
	/// Creates a message for `targets` of the given collection.
	pub fn new<I, S>(target_type: TargetType, targets: I, msg: MessageBody) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			target_type,
			target: targets.into_iter().map(Into::into).collect(),
			from: None,
			msg,
			ext: None,
		}
	}

	/// Sets the sender.
	pub fn sender(mut self, from: impl Into<String>) -> Self {
		self.from = Some(from.into());

		self
	}

	/// Attaches extension attributes.
	pub fn ext(mut self, ext: Value) -> Self {
		self.ext = Some(ext);

		self
	}
}

#[derive(Deserialize)]
struct ExportFile {
	url: String,
}

impl Client {
	/// Sends `message` and returns the per-recipient delivery status reported in `data`.
	pub async fn send_message(&self, message: &Message) -> Result<BTreeMap<String, String>> {
		let url = self.endpoint().path("messages", NO_SEGMENTS);
		let reply: CommonReply =
			self.call("send_message", Method::POST, url, Some(message)).await?;

		if reply.data.is_null() { Ok(BTreeMap::new()) } else { reply.data() }
	}

	/// Lists export URLs for the chat logs of the hour containing `hour`.
	///
	/// The hour is taken in `hour`'s own offset.
	pub async fn download_messages(&self, hour: OffsetDateTime) -> Result<Vec<String>> {
		let url = self.endpoint().path("chatmessages", &[hour_path(hour)]);
		let reply: CommonReply =
			self.call("download_messages", Method::GET, url, NO_BODY).await?;
		let files: Vec<ExportFile> = reply.data_list()?;

		Ok(files.into_iter().map(|f| f.url).collect())
	}
}

/// Formats `instant` as `yyyyMMddHH`.
fn hour_path(instant: OffsetDateTime) -> String {
	format!(
		"{:04}{:02}{:02}{:02}",
		instant.year(),
		u8::from(instant.month()),
		instant.day(),
		instant.hour()
	)
}
