use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value, ValueType};

fn validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::String(_) => Some(value.clone()),
        _ => None,
    }
}

/// Empty content reads back as null.
fn get_processor(value: Value) -> Value {
    match value {
        Value::String(content) if content.is_empty() => Value::Null,
        value => value,
    }
}

fn serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    Ok(value
        .as_str()
        .filter(|content| !content.is_empty())
        .map(JsonValue::from))
}

fn serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(JsonValue::from(value.as_str().unwrap_or_default()))
}

pub static CONVERSION_CONTENT: Conversion = Conversion {
    expected_types_messages: "`null`, `str`",
    get_default: Value::Null,
    get_processor: Some(get_processor),
    kind: ConversionKind::Field,
    name: "content",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("content"),
    serializer_optional: Some(serializer_optional),
    serializer_putter: None,
    serializer_required: Some(serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::String),
    set_type_processor: None,
    set_validator: Some(validator),
    sort_priority: 100,
};
