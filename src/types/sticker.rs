use serde::{Deserialize, Serialize};

use crate::types::id::{marker::StickerMarker, Id};

/// A sticker which can be sent with a message.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Sticker {
    pub id: Id<StickerMarker>,
    #[serde(default)]
    pub name: String,
}

impl Sticker {
    pub fn new(id: Id<StickerMarker>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
