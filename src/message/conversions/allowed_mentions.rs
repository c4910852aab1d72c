use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value, ValueType};
use crate::message::conversions::to_json;

fn validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::AllowedMentions(_) => Some(value.clone()),
        _ => None,
    }
}

/// Parts the new value leaves unset are kept from the old one.
fn merger(previous: Value, value: Value) -> Value {
    match (previous, value) {
        (Value::AllowedMentions(previous), Value::AllowedMentions(value)) => {
            Value::AllowedMentions(previous.merge(value))
        }
        (_, value) => value,
    }
}

fn serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    match value {
        Value::AllowedMentions(allowed_mentions) => to_json(allowed_mentions).map(Some),
        _ => Ok(None),
    }
}

fn serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(serializer_optional(value)?.unwrap_or(JsonValue::Null))
}

pub static CONVERSION_ALLOWED_MENTIONS: Conversion = Conversion {
    expected_types_messages: "`null`, `AllowedMentions`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "allowed_mentions",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("allowed_mentions"),
    serializer_optional: Some(serializer_optional),
    serializer_putter: None,
    serializer_required: Some(serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: Some(merger),
    set_type: Some(ValueType::AllowedMentions),
    set_type_processor: None,
    set_validator: Some(validator),
    sort_priority: 300,
};
