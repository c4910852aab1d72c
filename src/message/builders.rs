//! Builder types of message payloads.

use std::sync::LazyLock;
use tracing::trace;

use crate::builder::{
    builder_fielded::reject_positional_unknown, Builder, BuilderError, BuilderType, Namespace,
    SerializationConfiguration, Value, BUILDER_FIELDED,
};
use crate::message::conversions::{
    CONVERSION_ALLOWED_MENTIONS, CONVERSION_ATTACHMENTS, CONVERSION_CONTENT, CONVERSION_EMBED,
    CONVERSION_EMBEDS, CONVERSION_ENFORCE_NONCE, CONVERSION_FLAGS, CONVERSION_INSTANCE,
    CONVERSION_KEYWORD_PARAMETERS, CONVERSION_NONCE, CONVERSION_POSITIONAL_PARAMETERS,
    CONVERSION_REPLY, CONVERSION_SHOW_FOR_INVOKING_USER_ONLY, CONVERSION_SILENT,
    CONVERSION_STICKER, CONVERSION_STICKERS, CONVERSION_SUPPRESS_EMBEDS, CONVERSION_TTS,
    CONVERSION_VOICE_ATTACHMENT,
};

fn create(name: &'static str, bases: &[&'static BuilderType], namespace: Namespace) -> BuilderType {
    match BuilderType::new(name, bases, namespace) {
        Ok(builder_type) => builder_type,
        Err(error) => panic!("{error}"),
    }
}

/// Integers nothing else takes become the message content.
fn content_fallback(builder: &mut Builder, value: Value) -> Result<(), BuilderError> {
    match value {
        Value::Integer(number) => {
            trace!(
                builder_type = builder.builder_type().name(),
                number,
                "using positional integer as content"
            );
            builder.with_keyword_parameter("content", Value::String(number.to_string()))
        }
        value => reject_positional_unknown(builder, value),
    }
}

/// Fields shared by every message payload.
pub static MESSAGE_BUILDER_BASE: LazyLock<BuilderType> = LazyLock::new(|| {
    create(
        "MessageBuilderBase",
        &[&BUILDER_FIELDED],
        Namespace::new()
            .conversion("content", &CONVERSION_CONTENT)
            .conversion("embeds", &CONVERSION_EMBEDS)
            .conversion("embed", &CONVERSION_EMBED)
            .conversion("allowed_mentions", &CONVERSION_ALLOWED_MENTIONS)
            .conversion("attachments", &CONVERSION_ATTACHMENTS)
            .conversion("flags", &CONVERSION_FLAGS)
            .conversion("suppress_embeds", &CONVERSION_SUPPRESS_EMBEDS)
            .conversion("positional_parameters", &CONVERSION_POSITIONAL_PARAMETERS)
            .conversion("keyword_parameters", &CONVERSION_KEYWORD_PARAMETERS)
            .conversions_default([&CONVERSION_INSTANCE])
            .positional_unknown(content_fallback),
    )
});

/// Payload of a new channel message.
pub static MESSAGE_BUILDER_CREATE: LazyLock<BuilderType> = LazyLock::new(|| {
    create(
        "MessageBuilderCreate",
        &[&MESSAGE_BUILDER_BASE],
        Namespace::new()
            .conversion("reply", &CONVERSION_REPLY)
            .conversion("stickers", &CONVERSION_STICKERS)
            .conversion("sticker", &CONVERSION_STICKER)
            .conversion("silent", &CONVERSION_SILENT)
            .conversion("tts", &CONVERSION_TTS)
            .conversion("nonce", &CONVERSION_NONCE)
            .conversion("enforce_nonce", &CONVERSION_ENFORCE_NONCE)
            .conversion("voice_attachment", &CONVERSION_VOICE_ATTACHMENT),
    )
});

/// Payload of a message edit. Fields only a new message can have are
/// removed.
pub static MESSAGE_BUILDER_EDIT: LazyLock<BuilderType> = LazyLock::new(|| {
    create(
        "MessageBuilderEdit",
        &[&MESSAGE_BUILDER_CREATE],
        Namespace::new()
            .constant("reply", Value::Null)
            .constant("stickers", Value::Null)
            .constant("sticker", Value::Null)
            .constant("silent", Value::Null)
            .constant("tts", Value::Null)
            .constant("nonce", Value::Null)
            .constant("enforce_nonce", Value::Null)
            .constant("voice_attachment", Value::Null),
    )
});

/// Payload of an interaction response message.
pub static MESSAGE_BUILDER_INTERACTION_RESPONSE: LazyLock<BuilderType> = LazyLock::new(|| {
    create(
        "MessageBuilderInteractionResponse",
        &[&MESSAGE_BUILDER_CREATE],
        Namespace::new()
            .constant("reply", Value::Null)
            .constant("stickers", Value::Null)
            .constant("sticker", Value::Null)
            .constant("nonce", Value::Null)
            .constant("enforce_nonce", Value::Null)
            .conversion("show_for_invoking_user_only", &CONVERSION_SHOW_FOR_INVOKING_USER_ONLY),
    )
});

pub fn create_configuration(defaults: bool) -> Result<SerializationConfiguration, BuilderError> {
    SerializationConfiguration::from_names(
        &MESSAGE_BUILDER_CREATE,
        &[
            "content",
            "embeds",
            "allowed_mentions",
            "reply",
            "stickers",
            "flags",
            "tts",
            "nonce",
            "enforce_nonce",
            "attachments",
            "voice_attachment",
        ],
        defaults,
    )
}

pub fn edit_configuration(defaults: bool) -> Result<SerializationConfiguration, BuilderError> {
    SerializationConfiguration::from_names(
        &MESSAGE_BUILDER_EDIT,
        &["content", "embeds", "allowed_mentions", "flags", "attachments"],
        defaults,
    )
}

pub fn interaction_response_configuration(
    defaults: bool,
) -> Result<SerializationConfiguration, BuilderError> {
    SerializationConfiguration::from_names(
        &MESSAGE_BUILDER_INTERACTION_RESPONSE,
        &[
            "content",
            "embeds",
            "allowed_mentions",
            "flags",
            "tts",
            "attachments",
            "voice_attachment",
        ],
        defaults,
    )
}
