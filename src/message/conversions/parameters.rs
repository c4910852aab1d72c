//! Escape hatches: nested parameters and continuing another builder.

use crate::builder::{Conversion, ConversionKind, Value, ValueType};

fn positional_validator(value: &Value) -> Option<Value> {
    value.as_sequence().is_some().then(|| value.clone())
}

fn keyword_validator(value: &Value) -> Option<Value> {
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
    set_validator: Some(positional_validator),
    sort_priority: 900,
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
    set_validator: Some(keyword_validator),
    sort_priority: 901,
};

/// Merges a builder passed positionally into the new one.
pub static CONVERSION_INSTANCE: Conversion = Conversion {
    expected_types_messages: "`MessageBuilder`",
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
    sort_priority: 902,
};
