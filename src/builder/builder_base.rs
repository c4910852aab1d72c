//! Builder instances and the permissive root builder type.

use std::{
    collections::{hash_map::DefaultHasher, HashMap, HashSet},
    fmt::{Debug, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    sync::{Arc, LazyLock},
};
use tracing::trace;

use crate::builder::{
    builder_type::{Attribute, BuilderType, Namespace},
    conversion::Conversion,
    descriptor::ConversionDescriptor,
    error::BuilderError,
    payload::Payload,
    serialization_configuration::SerializationConfiguration,
    value::Value,
};

/// Root of every builder type. Unknown positional and keyword parameters are
/// accepted and dropped.
pub static BUILDER_BASE: LazyLock<BuilderType> = LazyLock::new(|| {
    let namespace = Namespace::new()
        .getter("getter_none", getter_none)
        .getter("getter_field", getter_field)
        .setter("setter_none", setter_none)
        .setter("setter_field", setter_field)
        .setter("setter_positional", setter_positional)
        .setter("setter_keyword", setter_keyword)
        .setter("setter_instance", setter_instance)
        .positional_unknown(accept_positional_unknown)
        .keyword_unknown(accept_keyword_unknown);

    match BuilderType::new("BuilderBase", &[], namespace) {
        Ok(builder_type) => builder_type,
        Err(error) => panic!("{error}"),
    }
});

/// A builder: the values set so far, keyed by conversion.
#[derive(Clone)]
pub struct Builder {
    builder_type: &'static BuilderType,
    fields: HashMap<&'static Conversion, Value>,
}

impl Builder {
    /// Create an empty builder.
    pub fn new(builder_type: &'static BuilderType) -> Self {
        Self {
            builder_type,
            fields: HashMap::new(),
        }
    }

    pub fn builder_type(&self) -> &'static BuilderType {
        self.builder_type
    }

    pub fn with_positional_parameters(
        &mut self,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<(), BuilderError> {
        for value in values {
            self.with_positional_parameter(value)?;
        }
        Ok(())
    }

    /// Classify one unlabeled value and set it.
    ///
    /// Tried in order: exact type, listing identifier (non-empty lists only),
    /// supertype, identifier. A value nothing matches goes to the type's
    /// unknown positional hook.
    pub fn with_positional_parameter(&mut self, value: Value) -> Result<(), BuilderError> {
        let builder_type = self.builder_type;
        let value_type = value.value_type();

        if let Some(descriptor) = builder_type.typed_descriptor(value_type) {
            return self.apply_typed(&descriptor, value);
        }

        if matches!(&value, Value::List(values) if !values.is_empty()) {
            for descriptor in builder_type.descriptors_listing() {
                let Some(identifier) = descriptor.conversion.set_listing_identifier else {
                    continue;
                };
                if let Some(matched) = identifier(&value) {
                    return descriptor.apply(self, matched);
                }
            }
        }

        let supertype_match = builder_type
            .descriptors_typed_ordered()
            .iter()
            .find(|descriptor| {
                descriptor
                    .conversion
                    .set_type
                    .is_some_and(|set_type| value_type.is_subtype_of(set_type))
            })
            .cloned();
        if let Some(descriptor) = supertype_match {
            builder_type.promote_typed(value_type, descriptor.clone());
            return self.apply_typed(&descriptor, value);
        }

        for descriptor in builder_type.descriptors_positional() {
            let Some(identifier) = descriptor.conversion.set_identifier else {
                continue;
            };
            if let Some(matched) = identifier(&value) {
                return descriptor.apply(self, matched);
            }
        }

        (builder_type.positional_unknown())(self, value)
    }

    pub fn with_keyword_parameters<'a>(
        &mut self,
        parameters: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<(), BuilderError> {
        for (key, value) in parameters {
            self.with_keyword_parameter(key, value)?;
        }
        Ok(())
    }

    /// Set a value by field name or alias.
    pub fn with_keyword_parameter(&mut self, key: &str, value: Value) -> Result<(), BuilderError> {
        let builder_type = self.builder_type;
        let Some(descriptor) = builder_type.descriptors_keyword().get(key) else {
            return (builder_type.keyword_unknown())(self, key, value);
        };

        let conversion = descriptor.conversion;
        match conversion.set_validator.and_then(|validator| validator(&value)) {
            Some(validated) => descriptor.apply(self, validated),
            None => Err(BuilderError::type_mismatch(
                key,
                conversion.expected_types_messages,
                &value,
            )),
        }
    }

    /// Assign a named attribute.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), BuilderError> {
        let builder_type = self.builder_type;
        match builder_type.descriptor(name) {
            Some(descriptor) => descriptor.set(self, value),
            None => Err(BuilderError::UnknownAttribute {
                type_name: builder_type.name(),
                name: name.to_owned(),
            }),
        }
    }

    /// Read a named attribute.
    pub fn get(&self, name: &str) -> Result<Value, BuilderError> {
        match self.builder_type.lookup(name) {
            Some(Attribute::Descriptor(descriptor)) => descriptor.get(self),
            Some(Attribute::Constant(value)) => Ok(value.clone()),
            _ => Err(BuilderError::UnknownAttribute {
                type_name: self.builder_type.name(),
                name: name.to_owned(),
            }),
        }
    }

    /// The raw stored value of a conversion.
    pub fn stored(&self, conversion: &'static Conversion) -> Option<&Value> {
        self.fields.get(conversion)
    }

    /// The stored value, or the default, passed through the conversion's
    /// `get_processor`.
    pub fn field_value(&self, conversion: &'static Conversion) -> Value {
        let value = self
            .fields
            .get(conversion)
            .cloned()
            .unwrap_or_else(|| conversion.get_default.clone());

        match conversion.get_processor {
            Some(processor) => processor(value),
            None => value,
        }
    }

    /// Stored fields in `sort_priority` order.
    pub fn iter_fields(&self) -> impl Iterator<Item = (&'static Conversion, &Value)> + '_ {
        let mut fields = self
            .fields
            .iter()
            .map(|(conversion, value)| (*conversion, value))
            .collect::<Vec<_>>();
        fields.sort_by_key(|(conversion, _)| (conversion.sort_priority, conversion.name));
        fields.into_iter()
    }

    /// Fold the configured conversions into a payload.
    pub fn serialise(&self, configuration: &SerializationConfiguration) -> Result<Payload, BuilderError> {
        let mut payload = Payload::default();
        for conversion in configuration.conversions() {
            if let Some(value) = self.fields.get(conversion) {
                payload = conversion.put(payload, configuration.defaults(), value)?;
            }
        }
        Ok(payload)
    }

    fn apply_typed(&mut self, descriptor: &Arc<ConversionDescriptor>, value: Value) -> Result<(), BuilderError> {
        let value = match descriptor.conversion.set_type_processor {
            Some(processor) => processor(value),
            None => value,
        };
        descriptor.apply(self, value)
    }
}

impl BuilderType {
    /// Create a builder and feed it positional then keyword parameters.
    pub fn instantiate<'a>(
        &'static self,
        positional: impl IntoIterator<Item = Value>,
        keyword: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<Builder, BuilderError> {
        let mut builder = Builder::new(self);
        builder.with_positional_parameters(positional)?;
        builder.with_keyword_parameters(keyword)?;
        Ok(builder)
    }
}

impl PartialEq for Builder {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.builder_type, other.builder_type) {
            return false;
        }

        self.fields
            .keys()
            .chain(other.fields.keys())
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .all(|conversion| self.field_value(conversion) == other.field_value(conversion))
    }
}

impl Eq for Builder {}

impl Hash for Builder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut accumulator = 0_u64;
        for (conversion, value) in &self.fields {
            if value.is_truthy() {
                accumulator ^= hash_one(conversion) & hash_one(value);
            }
        }
        state.write_u64(accumulator);
    }
}

fn hash_one(value: impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl Debug for Builder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "<{}", self.builder_type.name())?;
        for (index, (conversion, value)) in self.iter_fields().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            write!(f, "{separator}{}={}", conversion.name, value.repr())?;
        }
        f.write_str(">")
    }
}

/// Getter of write-only fields.
pub fn getter_none(_builder: &Builder, conversion: &'static Conversion) -> Result<Value, BuilderError> {
    Err(BuilderError::NotGettable(conversion.name))
}

pub fn getter_field(builder: &Builder, conversion: &'static Conversion) -> Result<Value, BuilderError> {
    Ok(builder.field_value(conversion))
}

/// Setter that drops the value.
pub fn setter_none(_builder: &mut Builder, _conversion: &'static Conversion, _value: Value) -> Result<(), BuilderError> {
    Ok(())
}

/// Store the value, merging it into the previous one when the conversion has
/// a merger.
pub fn setter_field(builder: &mut Builder, conversion: &'static Conversion, value: Value) -> Result<(), BuilderError> {
    let value = match (conversion.set_merger, builder.fields.remove(conversion)) {
        (Some(merger), Some(previous)) => merger(previous, value),
        _ => value,
    };
    builder.fields.insert(conversion, value);
    Ok(())
}

/// Feed a sequence back in as further positional parameters.
pub fn setter_positional(builder: &mut Builder, _conversion: &'static Conversion, value: Value) -> Result<(), BuilderError> {
    match value {
        Value::List(values) | Value::Tuple(values) => builder.with_positional_parameters(values),
        value => builder.with_positional_parameter(value),
    }
}

/// Feed a mapping back in as further keyword parameters.
pub fn setter_keyword(builder: &mut Builder, conversion: &'static Conversion, value: Value) -> Result<(), BuilderError> {
    match value {
        Value::Map(parameters) => {
            for (key, value) in parameters {
                builder.with_keyword_parameter(&key, value)?;
            }
            Ok(())
        }
        value => Err(BuilderError::type_mismatch(
            conversion.name,
            conversion.expected_types_messages,
            &value,
        )),
    }
}

/// Merge another builder's fields into this one.
pub fn setter_instance(builder: &mut Builder, conversion: &'static Conversion, value: Value) -> Result<(), BuilderError> {
    let Value::Builder(other) = value else {
        return Err(BuilderError::type_mismatch(
            conversion.name,
            conversion.expected_types_messages,
            &value,
        ));
    };

    let compatible = builder.builder_type.is_subtype_of(other.builder_type)
        || other.builder_type.is_subtype_of(builder.builder_type);
    if !compatible {
        return Err(BuilderError::IncompatibleBuilder {
            expected: builder.builder_type.name(),
            received: other.builder_type.name(),
        });
    }

    let mut fields = other.fields.into_iter().collect::<Vec<_>>();
    fields.sort_by_key(|(conversion, _)| (conversion.sort_priority, conversion.name));
    for (conversion, value) in fields {
        setter_field(builder, conversion, value)?;
    }
    Ok(())
}

pub fn accept_positional_unknown(builder: &mut Builder, value: Value) -> Result<(), BuilderError> {
    trace!(
        builder_type = builder.builder_type.name(),
        value_type = value.value_type().name(),
        "dropping unknown positional parameter"
    );
    Ok(())
}

pub fn accept_keyword_unknown(builder: &mut Builder, key: &str, _value: Value) -> Result<(), BuilderError> {
    trace!(
        builder_type = builder.builder_type.name(),
        key,
        "dropping unknown keyword parameter"
    );
    Ok(())
}
