use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value, ValueType};
use crate::message::conversions::first_of_list;

fn is_sticker(value: &Value) -> bool {
    match value {
        Value::Sticker(_) => true,
        Value::Integer(sticker_id) => *sticker_id > 0,
        _ => false,
    }
}

fn list_of(value: &Value, predicate: fn(&Value) -> bool) -> Option<Value> {
    let values = value.as_sequence()?;
    values
        .iter()
        .all(predicate)
        .then(|| Value::List(values.to_vec()))
}

/// Positional lists must hold sticker entities; bare ids are only taken by
/// name.
fn listing_identifier(value: &Value) -> Option<Value> {
    list_of(value, |value| matches!(value, Value::Sticker(_)))
}

fn stickers_validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        value if is_sticker(value) => Some(Value::List(vec![value.clone()])),
        value => list_of(value, is_sticker),
    }
}

fn sticker_ids(value: &Value) -> Vec<JsonValue> {
    value
        .as_sequence()
        .unwrap_or_default()
        .iter()
        .filter_map(|value| match value {
            Value::Sticker(sticker) => Some(JsonValue::from(sticker.id.to_string())),
            Value::Integer(sticker_id) => Some(JsonValue::from(sticker_id.to_string())),
            _ => None,
        })
        .collect()
}

fn serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    let sticker_ids = sticker_ids(value);
    Ok((!sticker_ids.is_empty()).then_some(JsonValue::Array(sticker_ids)))
}

fn serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(JsonValue::Array(sticker_ids(value)))
}

/// Stickers or sticker ids; serialized as ids.
pub static CONVERSION_STICKERS: Conversion = Conversion {
    expected_types_messages: "`null`, `int`, `Sticker`, `list` of (`int`, `Sticker`)",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "stickers",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("sticker_ids"),
    serializer_optional: Some(serializer_optional),
    serializer_putter: None,
    serializer_required: Some(serializer_required),
    set_identifier: None,
    set_listing_identifier: Some(listing_identifier),
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(stickers_validator),
    sort_priority: 500,
};

fn sticker_type_processor(value: Value) -> Value {
    Value::List(vec![value])
}

fn sticker_validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        value if is_sticker(value) => Some(Value::List(vec![value.clone()])),
        _ => None,
    }
}

pub static CONVERSION_STICKER: Conversion = Conversion {
    expected_types_messages: "`null`, `int`, `Sticker`",
    get_default: Value::Null,
    get_processor: Some(first_of_list),
    kind: ConversionKind::Field,
    name: "sticker",
    name_aliases: None,
    output_conversion: Some(&CONVERSION_STICKERS),
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::Sticker),
    set_type_processor: Some(sticker_type_processor),
    set_validator: Some(sticker_validator),
    sort_priority: 501,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Id, Sticker};
    use serde_json::json;

    #[test]
    fn serialized_as_ids() {
        let value = stickers_validator(&Value::List(vec![
            Value::from(Sticker::new(Id::new(10), "wave")),
            Value::Integer(11),
        ]))
        .unwrap();
        assert_eq!(serializer_required(&value).unwrap(), json!(["10", "11"]));
        assert_eq!(serializer_optional(&Value::Null).unwrap(), None);
        assert_eq!(serializer_required(&Value::Null).unwrap(), json!([]));
    }

    #[test]
    fn mixed_lists_are_rejected() {
        let value = Value::List(vec![Value::Integer(1), Value::from("a")]);
        assert_eq!(stickers_validator(&value), None);
        assert_eq!(sticker_validator(&Value::Integer(0)), None);
        assert_eq!(listing_identifier(&Value::List(vec![Value::Integer(1)])), None);
    }
}
