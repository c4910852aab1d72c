use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, Value, ValueType};
use crate::types::MessageFlags;

fn type_processor(value: Value) -> Value {
    match value.as_integer() {
        Some(flags) if flags >= 0 => Value::Integer(flags),
        _ => value,
    }
}

/// Negative integers have no flag bits and are rejected.
fn validator(value: &Value) -> Option<Value> {
    match value {
        Value::Integer(flags) if *flags >= 0 => Some(Value::Integer(*flags)),
        Value::MessageFlags(flags) => Some(Value::Integer(flags.to_integer())),
        _ => None,
    }
}

fn merger(previous: Value, value: Value) -> Value {
    Value::Integer(previous.as_integer().unwrap_or(0) | value.as_integer().unwrap_or(0))
}

fn get_processor(value: Value) -> Value {
    Value::MessageFlags(MessageFlags::from_integer(value.as_integer().unwrap_or(0)))
}

fn serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
    Ok(value
        .as_integer()
        .filter(|flags| *flags != 0)
        .map(JsonValue::from))
}

fn serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
    Ok(JsonValue::from(value.as_integer().unwrap_or(0)))
}

/// Stored as an integer; every assignment is OR-ed into the previous one.
pub static CONVERSION_FLAGS: Conversion = Conversion {
    expected_types_messages: "`int`, `MessageFlags`",
    get_default: Value::Integer(0),
    get_processor: Some(get_processor),
    kind: ConversionKind::Field,
    name: "flags",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("flags"),
    serializer_optional: Some(serializer_optional),
    serializer_putter: None,
    serializer_required: Some(serializer_required),
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: Some(merger),
    set_type: Some(ValueType::MessageFlags),
    set_type_processor: Some(type_processor),
    set_validator: Some(validator),
    sort_priority: 600,
};

/// Declares a boolean view over one flag bit. Setting `false` leaves the
/// stored flags untouched.
macro_rules! flag_view {
    ($(#[$meta:meta])* $conversion:ident, $name:literal, $flag:expr, $priority:literal) => {
        $(#[$meta])*
        pub static $conversion: Conversion = {
            fn validator(value: &Value) -> Option<Value> {
                match value {
                    Value::Bool(true) => Some(Value::Integer($flag.to_integer())),
                    Value::Bool(false) => Some(Value::Integer(0)),
                    _ => None,
                }
            }

            fn get_processor(value: Value) -> Value {
                let flags = MessageFlags::from_integer(value.as_integer().unwrap_or(0));
                Value::Bool(flags.contains($flag))
            }

            Conversion {
                expected_types_messages: "`bool`",
                get_default: Value::Null,
                get_processor: Some(get_processor),
                kind: ConversionKind::Field,
                name: $name,
                name_aliases: None,
                output_conversion: Some(&CONVERSION_FLAGS),
                serializer_key: None,
                serializer_optional: None,
                serializer_putter: None,
                serializer_required: None,
                set_identifier: None,
                set_listing_identifier: None,
                set_merger: None,
                set_type: None,
                set_type_processor: None,
                set_validator: Some(validator),
                sort_priority: $priority,
            }
        };
    };
}

flag_view!(
    /// Whether embeds are hidden.
    CONVERSION_SUPPRESS_EMBEDS,
    "suppress_embeds",
    MessageFlags::SUPPRESS_EMBEDS,
    601
);

flag_view!(
    /// Whether the message skips push and desktop notifications.
    CONVERSION_SILENT,
    "silent",
    MessageFlags::SUPPRESS_NOTIFICATIONS,
    602
);

flag_view!(
    /// Whether an interaction response is ephemeral.
    CONVERSION_SHOW_FOR_INVOKING_USER_ONLY,
    "show_for_invoking_user_only",
    MessageFlags::EPHEMERAL,
    603
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitwise_or_merger() {
        assert_eq!(merger(Value::Integer(1), Value::Integer(1)), Value::Integer(1));
        assert_eq!(merger(Value::Integer(1), Value::Integer(2)), Value::Integer(3));
        assert_eq!(
            get_processor(Value::Integer(3)),
            Value::MessageFlags(MessageFlags::from_bits_retain(3)),
        );
    }

    #[test]
    fn views_write_one_bit() {
        let validator = CONVERSION_SILENT.set_validator.unwrap();
        assert_eq!(
            validator(&Value::Bool(true)),
            Some(Value::Integer(MessageFlags::SUPPRESS_NOTIFICATIONS.to_integer())),
        );
        assert_eq!(validator(&Value::Integer(1)), None);

        let get_processor = CONVERSION_SILENT.get_processor.unwrap();
        let stored = Value::MessageFlags(MessageFlags::SUPPRESS_NOTIFICATIONS | MessageFlags::EPHEMERAL);
        assert_eq!(get_processor(stored), Value::Bool(true));
    }
}
