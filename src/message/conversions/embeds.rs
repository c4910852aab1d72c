use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value, ValueType};
use crate::message::conversions::{first_of_list, merge_lists, to_json};

fn listing_identifier(value: &Value) -> Option<Value> {
    let values = value.as_sequence()?;
    values
        .iter()
        .all(|value| matches!(value, Value::Embed(_)))
        .then(|| Value::List(values.to_vec()))
}

fn embeds_validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::Embed(_) => Some(Value::List(vec![value.clone()])),
        value => listing_identifier(value),
    }
}

fn embeds_get_processor(value: Value) -> Value {
    match value {
        Value::List(values) if values.is_empty() => Value::Null,
        value => value,
    }
}

fn serialize_embeds(value: &Value) -> Result<JsonValue, BuilderError> {
    let embeds = value
        .as_sequence()
        .unwrap_or_default()
        .iter()
        .filter_map(|value| match value {
            Value::Embed(embed) => Some(to_json(embed)),
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(JsonValue::Array(embeds))
}

fn embeds_serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    if value.is_truthy() {
        serialize_embeds(value).map(Some)
    } else {
        Ok(None)
    }
}

pub static CONVERSION_EMBEDS: Conversion = Conversion {
    expected_types_messages: "`null`, `Embed`, `list` of `Embed`",
    get_default: Value::Null,
    get_processor: Some(embeds_get_processor),
    kind: ConversionKind::Field,
    name: "embeds",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("embeds"),
    serializer_optional: Some(embeds_serializer_optional),
    serializer_putter: None,
    serializer_required: Some(serialize_embeds),
    set_identifier: None,
    set_listing_identifier: Some(listing_identifier),
    set_merger: Some(merge_lists),
    set_type: None,
    set_type_processor: None,
    set_validator: Some(embeds_validator),
    sort_priority: 200,
};

fn embed_type_processor(value: Value) -> Value {
    Value::List(vec![value])
}

fn embed_validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::Embed(_) => Some(Value::List(vec![value.clone()])),
        _ => None,
    }
}

/// Single embed; writes through `embeds` and reads back the first one.
pub static CONVERSION_EMBED: Conversion = Conversion {
    expected_types_messages: "`null`, `Embed`",
    get_default: Value::Null,
    get_processor: Some(first_of_list),
    kind: ConversionKind::Field,
    name: "embed",
    name_aliases: None,
    output_conversion: Some(&CONVERSION_EMBEDS),
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::Embed),
    set_type_processor: Some(embed_type_processor),
    set_validator: Some(embed_validator),
    sort_priority: 201,
};
