//! Attachments: references to already uploaded files and voice recordings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::id::{marker::AttachmentMarker, Id};

/// An attachment which was already uploaded to Discord.
///
/// Passing one to a message builder keeps the file on the message instead of
/// uploading it again.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Attachment {
    pub id: Id<AttachmentMarker>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attachment {
    pub fn new(id: Id<AttachmentMarker>, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            description: None,
        }
    }
}

/// A voice message recording.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VoiceAttachment {
    /// Ogg opus encoded audio.
    pub data: Vec<u8>,
    pub duration: Duration,
    /// Base64 encoded byte array of the waveform preview.
    pub waveform: String,
}

impl VoiceAttachment {
    /// File name voice messages are uploaded under.
    pub const FILE_NAME: &'static str = "voice-message.ogg";

    pub fn new(data: Vec<u8>, duration: Duration, waveform: impl Into<String>) -> Self {
        Self {
            data,
            duration,
            waveform: waveform.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_parses_from_discord_data() {
        let data = serde_json::json!({
            "id": "1001",
            "filename": "cat.png",
            "size": 12,
            "url": "https://cdn.discordapp.com/attachments/1/1001/cat.png",
        });

        let attachment: Attachment = serde_json::from_value(data).unwrap();
        assert_eq!(attachment, Attachment::new(Id::new(1001), "cat.png"));
    }
}
