//! Conversion units of the message builders.
//!
//! Sort priorities are spaced by hundreds per payload field; views of a field
//! sort right after it.

mod allowed_mentions;
mod attachments;
mod content;
mod embeds;
mod flags;
mod parameters;
mod reply;
mod stickers;
mod toggles;
mod voice_attachment;

pub use allowed_mentions::CONVERSION_ALLOWED_MENTIONS;
pub use attachments::CONVERSION_ATTACHMENTS;
pub use content::CONVERSION_CONTENT;
pub use embeds::{CONVERSION_EMBED, CONVERSION_EMBEDS};
pub use flags::{
    CONVERSION_FLAGS, CONVERSION_SHOW_FOR_INVOKING_USER_ONLY, CONVERSION_SILENT,
    CONVERSION_SUPPRESS_EMBEDS,
};
pub use parameters::{CONVERSION_INSTANCE, CONVERSION_KEYWORD_PARAMETERS, CONVERSION_POSITIONAL_PARAMETERS};
pub use reply::CONVERSION_REPLY;
pub use stickers::{CONVERSION_STICKER, CONVERSION_STICKERS};
pub use toggles::{CONVERSION_ENFORCE_NONCE, CONVERSION_NONCE, CONVERSION_TTS};
pub use voice_attachment::CONVERSION_VOICE_ATTACHMENT;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Value};

fn to_json(value: &impl Serialize) -> Result<JsonValue, BuilderError> {
    Ok(serde_json::to_value(value)?)
}

/// Concatenate list values; a new non-list value replaces, null clears.
fn merge_lists(previous: Value, value: Value) -> Value {
    match (previous, value) {
        (Value::List(mut previous), Value::List(values)) => {
            previous.extend(values);
            Value::List(previous)
        }
        (_, value) => value,
    }
}

/// First element of a stored list.
fn first_of_list(value: Value) -> Value {
    match value {
        Value::List(values) => values.into_iter().next().unwrap_or_default(),
        value => value,
    }
}

fn validate_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        _ => None,
    }
}

fn serialize_bool_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    Ok(matches!(value, Value::Bool(true)).then_some(JsonValue::Bool(true)))
}

fn serialize_bool_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(JsonValue::Bool(matches!(value, Value::Bool(true))))
}
