//! Conversion units: declarative descriptions of one builder field.
//!
//! A [`Conversion`] describes how a field recognises input (by exact type,
//! by structural identifier, by list elements, or by name), how repeated
//! assignments merge, how the stored value is read back, and how it is
//! written into the outgoing [`Payload`].
//!
//! Conversions are declared as `static` items with every field spelled out;
//! their identity is their address.

use serde_json::Value as JsonValue;
use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    iter,
};

use crate::builder::{error::BuilderError, payload::Payload, value::Value, value::ValueType};

/// Selects the getter and setter a builder type supplies for a conversion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ConversionKind {
    /// Recognised and discarded.
    None,
    /// Stored in the builder's field mapping.
    Field,
    /// The value is a sequence of further positional parameters.
    Positional,
    /// The value is a mapping of further keyword parameters.
    Keyword,
    /// The value is another builder whose fields are merged in.
    Instance,
}

impl ConversionKind {
    /// Name of the getter attribute the owning builder type must resolve.
    pub const fn getter_name(self) -> &'static str {
        match self {
            Self::Field => "getter_field",
            Self::None | Self::Positional | Self::Keyword | Self::Instance => "getter_none",
        }
    }

    /// Name of the setter attribute the owning builder type must resolve.
    pub const fn setter_name(self) -> &'static str {
        match self {
            Self::None => "setter_none",
            Self::Field => "setter_field",
            Self::Positional => "setter_positional",
            Self::Keyword => "setter_keyword",
            Self::Instance => "setter_instance",
        }
    }
}

pub type SetTypeProcessor = fn(Value) -> Value;
/// Yields the (converted) value if it matches, nothing otherwise.
pub type SetIdentifier = fn(&Value) -> Option<Value>;
pub type SetValidator = fn(&Value) -> Option<Value>;
pub type SetMerger = fn(Value, Value) -> Value;
pub type GetProcessor = fn(Value) -> Value;
pub type SerializerOptional = fn(&Value) -> Result<Option<JsonValue>, BuilderError>;
pub type SerializerRequired = fn(&Value) -> Result<JsonValue, BuilderError>;
pub type SerializerPutter = fn(Payload, bool, &Value) -> Result<Payload, BuilderError>;

/// Descriptor of one buildable and serialisable field.
pub struct Conversion {
    /// Human readable description of the accepted input, for error messages.
    pub expected_types_messages: &'static str,
    pub get_default: Value,
    pub get_processor: Option<GetProcessor>,
    pub kind: ConversionKind,
    pub name: &'static str,
    pub name_aliases: Option<&'static [&'static str]>,
    /// Conversion whose storage slot this one writes through.
    pub output_conversion: Option<&'static Conversion>,
    pub serializer_key: Option<&'static str>,
    pub serializer_optional: Option<SerializerOptional>,
    /// Writes the value into the payload. When absent, a default putter
    /// writes under `serializer_key`.
    pub serializer_putter: Option<SerializerPutter>,
    pub serializer_required: Option<SerializerRequired>,
    pub set_identifier: Option<SetIdentifier>,
    /// Like `set_identifier`, but only tried on non-empty lists.
    pub set_listing_identifier: Option<SetIdentifier>,
    pub set_merger: Option<SetMerger>,
    pub set_type: Option<ValueType>,
    pub set_type_processor: Option<SetTypeProcessor>,
    /// Used for keyword and attribute assignment only.
    pub set_validator: Option<SetValidator>,
    /// Lower sorts first.
    pub sort_priority: i32,
}

impl Conversion {
    /// The field name followed by every alias, in declaration order.
    pub fn iter_names(&self) -> impl Iterator<Item = &'static str> {
        iter::once(self.name).chain(self.name_aliases.unwrap_or_default().iter().copied())
    }

    /// The conversion whose slot stores this one's values.
    pub fn output(&'static self) -> &'static Conversion {
        self.output_conversion.unwrap_or(self)
    }

    /// Contribute `value` to the payload, possibly replacing the payload.
    pub fn put(&self, payload: Payload, defaults: bool, value: &Value) -> Result<Payload, BuilderError> {
        match self.serializer_putter {
            Some(putter) => putter(payload, defaults, value),
            None => self.put_default(payload, defaults, value),
        }
    }

    fn put_default(&self, mut payload: Payload, defaults: bool, value: &Value) -> Result<Payload, BuilderError> {
        let Some(key) = self.serializer_key else {
            return Ok(payload);
        };

        let json = match (defaults, self.serializer_optional, self.serializer_required) {
            (true, _, Some(required)) | (false, None, Some(required)) => Some(required(value)?),
            (_, Some(optional), _) => optional(value)?,
            (_, None, None) => None,
        };

        if let Some(json) = json {
            payload.insert(key, json);
        }
        Ok(payload)
    }
}

impl PartialEq for Conversion {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Conversion {}

impl Hash for Conversion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self, state);
    }
}

impl Debug for Conversion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Conversion")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("sort_priority", &self.sort_priority)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn serializer_optional(value: &Value) -> Result<Option<JsonValue>, BuilderError> {
        Ok(value.as_integer().filter(|value| *value != 0).map(JsonValue::from))
    }

    fn serializer_required(value: &Value) -> Result<JsonValue, BuilderError> {
        Ok(JsonValue::from(value.as_integer().unwrap_or(0)))
    }

    static CONVERSION_COUNT: Conversion = Conversion {
        expected_types_messages: "`int`",
        get_default: Value::Integer(0),
        get_processor: None,
        kind: ConversionKind::Field,
        name: "count",
        name_aliases: Some(&["amount", "number"]),
        output_conversion: None,
        serializer_key: Some("count"),
        serializer_optional: Some(serializer_optional),
        serializer_putter: None,
        serializer_required: Some(serializer_required),
        set_identifier: None,
        set_listing_identifier: None,
        set_merger: None,
        set_type: Some(ValueType::Integer),
        set_type_processor: None,
        set_validator: None,
        sort_priority: 0,
    };

    static CONVERSION_COUNT_VIEW: Conversion = Conversion {
        expected_types_messages: "`int`",
        get_default: Value::Null,
        get_processor: None,
        kind: ConversionKind::Field,
        name: "count_view",
        name_aliases: None,
        output_conversion: Some(&CONVERSION_COUNT),
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
        sort_priority: 1,
    };

    #[test]
    fn iter_names_yields_name_then_aliases() {
        let names = CONVERSION_COUNT.iter_names().collect::<Vec<_>>();
        assert_eq!(names, ["count", "amount", "number"]);
        // restartable
        assert_eq!(CONVERSION_COUNT.iter_names().count(), 3);
        assert_eq!(CONVERSION_COUNT_VIEW.iter_names().collect::<Vec<_>>(), ["count_view"]);
    }

    #[test]
    fn output_defaults_to_self() {
        assert_eq!(CONVERSION_COUNT.output(), &CONVERSION_COUNT);
        assert_eq!(CONVERSION_COUNT_VIEW.output(), &CONVERSION_COUNT);
        assert_ne!(&CONVERSION_COUNT, &CONVERSION_COUNT_VIEW);
    }

    #[test]
    fn default_putter_respects_defaults() {
        let payload = CONVERSION_COUNT
            .put(Payload::default(), false, &Value::Integer(0))
            .unwrap();
        assert!(payload.is_empty());

        let payload = CONVERSION_COUNT
            .put(Payload::default(), true, &Value::Integer(0))
            .unwrap();
        assert_eq!(payload.get("count"), Some(&json!(0)));

        let payload = CONVERSION_COUNT
            .put(Payload::default(), false, &Value::Integer(4))
            .unwrap();
        assert_eq!(payload.get("count"), Some(&json!(4)));
    }

    #[test]
    fn no_serializer_contributes_nothing() {
        let payload = CONVERSION_COUNT_VIEW
            .put(Payload::default(), true, &Value::Integer(4))
            .unwrap();
        assert!(payload.is_empty());
    }
}
