//! Discord entities consumed by the message builders.
//!
//! These are plain data: they know how to serialize themselves to Discord
//! JSON and how to be parsed back from it, and nothing else. The builder
//! engine in [`crate::builder`] accepts them as [`Value`] variants.
//!
//! [`Value`]: crate::builder::Value

/// Allowed mentions of a message.
pub mod allowed_mentions;

/// Uploaded attachment references and voice recordings.
pub mod attachment;

/// Rich embeds.
pub mod embed;

/// Message flags.
pub mod flags;

/// Type-safe IDs with marker types.
pub mod id;

/// Reply references.
pub mod message_reference;

/// Stickers.
pub mod sticker;

pub use self::allowed_mentions::{AllowedMentions, MentionType};
pub use self::attachment::{Attachment, VoiceAttachment};
pub use self::embed::{Embed, EmbedAuthor, EmbedBuilder, EmbedField, EmbedFooter, EmbedMedia};
pub use self::flags::MessageFlags;
pub use self::id::marker::{
    AttachmentMarker, ChannelMarker, GuildMarker, MessageMarker, RoleMarker, StickerMarker,
    UserMarker,
};
pub use self::id::Id;
pub use self::message_reference::MessageReference;
pub use self::sticker::Sticker;
