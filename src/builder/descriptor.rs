//! Binding of a conversion to a builder type's getter and setter.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::builder::{
    builder_base::Builder,
    builder_type::Attribute,
    conversion::Conversion,
    error::BuilderError,
    value::Value,
};

/// Reads a conversion's value out of a builder.
pub type Getter = fn(&Builder, &'static Conversion) -> Result<Value, BuilderError>;
/// Writes a conversion's value into a builder.
pub type Setter = fn(&mut Builder, &'static Conversion, Value) -> Result<(), BuilderError>;

/// A conversion bound into one builder type.
///
/// Created once per (builder type, conversion) pair when the builder type is
/// created. Named descriptors are reachable as attributes of the builder
/// type; unnamed ones only take part in positional matching.
pub struct ConversionDescriptor {
    pub attribute_name: Option<&'static str>,
    pub conversion: &'static Conversion,
    pub output_conversion: &'static Conversion,
    getter: Getter,
    setter: Setter,
}

impl ConversionDescriptor {
    /// Bind `conversion`, resolving its getter and setter through `request`.
    ///
    /// `request` looks an attribute up on the builder type under
    /// construction, falling back to its bases.
    pub fn new<F>(
        attribute_name: Option<&'static str>,
        conversion: &'static Conversion,
        type_name: &'static str,
        request: F,
    ) -> Result<Self, BuilderError>
    where
        F: Fn(&'static str) -> Option<Attribute>,
    {
        let getter_name = conversion.kind.getter_name();
        let getter = match request(getter_name) {
            Some(Attribute::Getter(getter)) => getter,
            _ => {
                return Err(BuilderError::UnresolvedAttribute {
                    type_name,
                    attribute: getter_name,
                    expected: "a getter",
                })
            }
        };

        let setter_name = conversion.kind.setter_name();
        let setter = match request(setter_name) {
            Some(Attribute::Setter(setter)) => setter,
            _ => {
                return Err(BuilderError::UnresolvedAttribute {
                    type_name,
                    attribute: setter_name,
                    expected: "a setter",
                })
            }
        };

        Ok(Self {
            attribute_name,
            conversion,
            output_conversion: conversion.output(),
            getter,
            setter,
        })
    }

    /// Attribute name, falling back to the conversion's own name.
    pub fn display_name(&self) -> &'static str {
        self.attribute_name.unwrap_or(self.conversion.name)
    }

    /// Validate and assign a value, like an attribute assignment.
    pub fn set(&self, builder: &mut Builder, value: Value) -> Result<(), BuilderError> {
        let Some(validator) = self.conversion.set_validator else {
            return Err(BuilderError::NotSettable(self.display_name()));
        };

        match validator(&value) {
            Some(validated) => self.apply(builder, validated),
            None => Err(BuilderError::type_mismatch(
                self.display_name(),
                self.conversion.expected_types_messages,
                &value,
            )),
        }
    }

    /// Read the value, like an attribute access.
    pub fn get(&self, builder: &Builder) -> Result<Value, BuilderError> {
        let value = (self.getter)(builder, self.output_conversion)?;

        if self.conversion != self.output_conversion {
            if let Some(processor) = self.conversion.get_processor {
                return Ok(processor(value));
            }
        }
        Ok(value)
    }

    /// Hand an already matched value to the setter.
    pub(crate) fn apply(&self, builder: &mut Builder, value: Value) -> Result<(), BuilderError> {
        (self.setter)(builder, self.output_conversion, value)
    }
}

impl Debug for ConversionDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ConversionDescriptor")
            .field("attribute_name", &self.attribute_name)
            .field("conversion", &self.conversion.name)
            .field("output_conversion", &self.output_conversion.name)
            .finish_non_exhaustive()
    }
}
