//! Markers for the resource types a message builder can reference.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used. A sticker's ID can not be
//! handed to a field that expects an attachment's ID, because only an
//! [`Id`] with a [`StickerMarker`] is accepted where a sticker's ID is
//! required.
//!
//! [`Id`]: super::Id

// DEVELOPMENT: When adding a new marker, make sure the entity owning it
// exposes the ID through a `Value` variant so conversions can accept it.

/// Marker for attachment IDs.
///
/// Types such as [`Attachment`] use this ID marker.
///
/// [`Attachment`]: crate::types::Attachment
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
///
/// Used by [`MessageReference::channel_id`].
///
/// [`MessageReference::channel_id`]: crate::types::MessageReference::channel_id
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for message IDs.
///
/// The `reply` field of the message builders accepts a bare message ID and
/// turns it into a [`MessageReference`].
///
/// [`MessageReference`]: crate::types::MessageReference
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for role IDs.
///
/// Used by [`AllowedMentions::roles`].
///
/// [`AllowedMentions::roles`]: crate::types::AllowedMentions::roles
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for sticker IDs.
///
/// Types such as [`Sticker`] use this ID marker.
///
/// [`Sticker`]: crate::types::Sticker
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerMarker;

/// Marker for user IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
