use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value, ValueType};
use crate::message::conversions::to_json;
use crate::types::{Id, MessageReference};

/// Accepts a reference, or the id of the message to reply to.
fn validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::MessageReference(_) => Some(value.clone()),
        Value::Integer(message_id) => {
            let message_id = Id::new_checked(u64::try_from(*message_id).ok()?)?;
            Some(Value::MessageReference(MessageReference::reply_to(message_id)))
        }
        _ => None,
    }
}

fn serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    match value {
        Value::MessageReference(reference) => to_json(reference).map(Some),
        _ => Ok(None),
    }
}

fn serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(serializer_optional(value)?.unwrap_or(JsonValue::Null))
}

pub static CONVERSION_REPLY: Conversion = Conversion {
    expected_types_messages: "`null`, `int` (message id), `MessageReference`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "reply",
    name_aliases: Some(&["message_reference"]),
    output_conversion: None,
    serializer_key: Some("message_reference"),
    serializer_optional: Some(serializer_optional),
    serializer_putter: None,
    serializer_required: Some(serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::MessageReference),
    set_type_processor: None,
    set_validator: Some(validator),
    sort_priority: 400,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_id_becomes_reference() {
        let value = validator(&Value::Integer(77)).unwrap();
        assert_eq!(value, Value::from(MessageReference::reply_to(Id::new(77))));
        assert_eq!(
            serializer_required(&value).unwrap(),
            json!({"message_id": "77", "fail_if_not_exists": true}),
        );
        assert_eq!(validator(&Value::Integer(0)), None);
        assert_eq!(validator(&Value::Integer(-1)), None);
    }
}
