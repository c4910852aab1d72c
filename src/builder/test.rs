//! Builder types and conversions shared by the engine's tests.

use serde_json::Value as JsonValue;
use std::sync::LazyLock;

use crate::builder::{
    builder_base::BUILDER_BASE,
    builder_fielded::BUILDER_FIELDED,
    builder_type::{BuilderType, Namespace},
    conversion::{Conversion, ConversionKind},
    error::BuilderError,
    value::{Value, ValueType},
};
use crate::types::MessageFlags;

fn create(name: &'static str, bases: &[&'static BuilderType], namespace: Namespace) -> BuilderType {
    BuilderType::new(name, bases, namespace).unwrap()
}

pub static TEST_BUILDER: LazyLock<BuilderType> = LazyLock::new(|| {
    create(
        "TestBuilder",
        &[&BUILDER_BASE],
        Namespace::new()
            .conversion("number", &CONVERSION_NUMBER)
            .conversion("number_text", &CONVERSION_NUMBER_TEXT)
            .conversion("flags", &CONVERSION_FLAG_BITS)
            .conversion("text", &CONVERSION_TEXT)
            .conversion("items", &CONVERSION_ITEMS)
            .conversion("nothing", &CONVERSION_NOTHING)
            .conversion("read_only", &CONVERSION_READ_ONLY)
            .conversion("positional_parameters", &CONVERSION_POSITIONAL_PARAMETERS)
            .conversion("keyword_parameters", &CONVERSION_KEYWORD_PARAMETERS)
            .conversions_default([&CONVERSION_INSTANCE]),
    )
});

pub static TEST_BUILDER_STRICT: LazyLock<BuilderType> =
    LazyLock::new(|| create("TestBuilderStrict", &[&TEST_BUILDER, &BUILDER_FIELDED], Namespace::new()));

pub static TEST_BUILDER_CHILD: LazyLock<BuilderType> = LazyLock::new(|| {
    create(
        "TestBuilderChild",
        &[&TEST_BUILDER],
        Namespace::new()
            .constant("text", Value::Null)
            .conversion("label", &CONVERSION_TEXT),
    )
});

fn number_validator(value: &Value) -> Option<Value> {
    value.as_integer().map(Value::Integer)
}

fn number_serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    Ok(value.as_integer().filter(|value| *value != 0).map(JsonValue::from))
}

fn number_serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(JsonValue::from(value.as_integer().unwrap_or(0)))
}

pub static CONVERSION_NUMBER: Conversion = Conversion {
    expected_types_messages: "`int`",
    get_default: Value::Integer(0),
    get_processor: None,
    kind: ConversionKind::Field,
    name: "number",
    name_aliases: Some(&["count"]),
    output_conversion: None,
    serializer_key: Some("number"),
    serializer_optional: Some(number_serializer_optional),
    serializer_putter: None,
    serializer_required: Some(number_serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::Integer),
    set_type_processor: None,
    set_validator: Some(number_validator),
    sort_priority: 10,
};

fn number_text_validator(value: &Value) -> Option<Value> {
    value.as_str()?.parse().ok().map(Value::Integer)
}

fn number_text_get_processor(value: Value) -> Value {
    match value.as_integer() {
        Some(number) => Value::String(number.to_string()),
        None => value,
    }
}

pub static CONVERSION_NUMBER_TEXT: Conversion = Conversion {
    expected_types_messages: "`str` of digits",
    get_default: Value::Null,
    get_processor: Some(number_text_get_processor),
    kind: ConversionKind::Field,
    name: "number_text",
    name_aliases: None,
    output_conversion: Some(&CONVERSION_NUMBER),
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(number_text_validator),
    sort_priority: 11,
};

fn flag_bits_type_processor(value: Value) -> Value {
    value.as_integer().map_or(value, Value::Integer)
}

fn flag_bits_merger(previous: Value, value: Value) -> Value {
    Value::Integer(previous.as_integer().unwrap_or(0) | value.as_integer().unwrap_or(0))
}

fn flag_bits_get_processor(value: Value) -> Value {
    Value::MessageFlags(MessageFlags::from_integer(value.as_integer().unwrap_or(0)))
}

pub static CONVERSION_FLAG_BITS: Conversion = Conversion {
    expected_types_messages: "`int`, `MessageFlags`",
    get_default: Value::Integer(0),
    get_processor: Some(flag_bits_get_processor),
    kind: ConversionKind::Field,
    name: "flags",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("flags"),
    serializer_optional: Some(number_serializer_optional),
    serializer_putter: None,
    serializer_required: Some(number_serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: Some(flag_bits_merger),
    set_type: Some(ValueType::MessageFlags),
    set_type_processor: Some(flag_bits_type_processor),
    set_validator: Some(number_validator),
    sort_priority: 20,
};

fn text_identifier(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) => Some(Value::String(text.clone())),
        Value::Integer(number) => Some(Value::String(number.to_string())),
        _ => None,
    }
}

fn text_validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::String(_) => Some(value.clone()),
        _ => None,
    }
}

fn text_get_processor(value: Value) -> Value {
    match value {
        Value::String(text) if text.is_empty() => Value::Null,
        value => value,
    }
}

fn text_serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    Ok(value.as_str().filter(|text| !text.is_empty()).map(JsonValue::from))
}

fn text_serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(JsonValue::from(value.as_str().unwrap_or_default()))
}

pub static CONVERSION_TEXT: Conversion = Conversion {
    expected_types_messages: "`null`, `str`",
    get_default: Value::Null,
    get_processor: Some(text_get_processor),
    kind: ConversionKind::Field,
    name: "text",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("text"),
    serializer_optional: Some(text_serializer_optional),
    serializer_putter: None,
    serializer_required: Some(text_serializer_required),
    set_identifier: Some(text_identifier),
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(text_validator),
    sort_priority: 30,
};

fn items_identifier(value: &Value) -> Option<Value> {
    let values = value.as_sequence()?;
    values
        .iter()
        .all(|value| value.as_str().is_some())
        .then(|| Value::List(values.to_vec()))
}

fn items_merger(previous: Value, value: Value) -> Value {
    match (previous, value) {
        (Value::List(mut previous), Value::List(values)) => {
            previous.extend(values);
            Value::List(previous)
        }
        (_, value) => value,
    }
}

pub static CONVERSION_ITEMS: Conversion = Conversion {
    expected_types_messages: "`list` of `str`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "items",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: Some(items_identifier),
    set_merger: Some(items_merger),
    set_type: None,
    set_type_processor: None,
    set_validator: Some(items_identifier),
    sort_priority: 40,
};

fn nothing_identifier(value: &Value) -> Option<Value> {
    value.is_null().then_some(Value::Null)
}

pub static CONVERSION_NOTHING: Conversion = Conversion {
    expected_types_messages: "`null`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::None,
    name: "nothing",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: Some(nothing_identifier),
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(nothing_identifier),
    sort_priority: 50,
};

pub static CONVERSION_READ_ONLY: Conversion = Conversion {
    expected_types_messages: "",
    get_default: Value::Bool(true),
    get_processor: None,
    kind: ConversionKind::Field,
    name: "read_only",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: None,
    sort_priority: 60,
};

fn sequence_validator(value: &Value) -> Option<Value> {
    value.as_sequence().is_some().then(|| value.clone())
}

fn map_validator(value: &Value) -> Option<Value> {
    matches!(value, Value::Map(_)).then(|| value.clone())
}

pub static CONVERSION_POSITIONAL_PARAMETERS: Conversion = Conversion {
    expected_types_messages: "`list`, `tuple`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Positional,
    name: "positional_parameters",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(sequence_validator),
    sort_priority: 70,
};

pub static CONVERSION_KEYWORD_PARAMETERS: Conversion = Conversion {
    expected_types_messages: "`dict`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Keyword,
    name: "keyword_parameters",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: None,
    set_type_processor: None,
    set_validator: Some(map_validator),
    sort_priority: 71,
};

pub static CONVERSION_INSTANCE: Conversion = Conversion {
    expected_types_messages: "`Builder`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Instance,
    name: "instance",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: None,
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::Builder),
    set_type_processor: None,
    set_validator: None,
    sort_priority: 0,
};
