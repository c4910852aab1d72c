//! Small scalar fields of created messages.

use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value};
use crate::message::conversions::{serialize_bool_optional, serialize_bool_required, validate_bool};

pub static CONVERSION_TTS: Conversion = Conversion {
    expected_types_messages: "`bool`",
    get_default: Value::Bool(false),
    get_processor: None,
    kind: ConversionKind::Field,
    name: "tts",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("tts"),
    serializer_optional: Some(serialize_bool_optional),
    serializer_putter: None,
    serializer_required: Some(serialize_bool_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(validate_bool),
    sort_priority: 700,
};

fn nonce_validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::String(_) | Value::Integer(_) => Some(value.clone()),
        _ => None,
    }
}

fn nonce_json(value: &Value) -> JsonValue {
    match value {
        Value::String(nonce) if !nonce.is_empty() => JsonValue::from(nonce.as_str()),
        Value::Integer(nonce) => JsonValue::from(*nonce),
        _ => JsonValue::Null,
    }
}

fn nonce_serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    let nonce = nonce_json(value);
    Ok((!nonce.is_null()).then_some(nonce))
}

fn nonce_serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(nonce_json(value))
}

/// Client side identifier of a created message.
pub static CONVERSION_NONCE: Conversion = Conversion {
    expected_types_messages: "`null`, `int`, `str`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "nonce",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("nonce"),
    serializer_optional: Some(nonce_serializer_optional),
    serializer_putter: None,
    serializer_required: Some(nonce_serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(nonce_validator),
    sort_priority: 800,
};

pub static CONVERSION_ENFORCE_NONCE: Conversion = Conversion {
    expected_types_messages: "`bool`",
    get_default: Value::Bool(false),
    get_processor: None,
    kind: ConversionKind::Field,
    name: "enforce_nonce",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("enforce_nonce"),
    serializer_optional: Some(serialize_bool_optional),
    serializer_putter: None,
    serializer_required: Some(serialize_bool_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(validate_bool),
    sort_priority: 801,
};
