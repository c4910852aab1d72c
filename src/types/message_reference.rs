use serde::{Deserialize, Serialize};

use crate::types::id::{
    marker::{ChannelMarker, GuildMarker, MessageMarker},
    Id,
};

/// Reference to the message a new message replies to.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MessageReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Id<MessageMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default)]
    pub fail_if_not_exists: bool,
}

impl MessageReference {
    /// Reply to the given message; fails if the message is gone.
    pub fn reply_to(message_id: Id<MessageMarker>) -> Self {
        Self {
            message_id: Some(message_id),
            fail_if_not_exists: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_to_serializes() {
        let reference = MessageReference::reply_to(Id::new(12345));
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message_id": "12345", "fail_if_not_exists": true }),
        );
    }
}
