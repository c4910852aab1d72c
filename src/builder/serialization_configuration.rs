use std::sync::Arc;

use crate::builder::{
    builder_type::BuilderType, conversion::Conversion, descriptor::ConversionDescriptor,
    error::BuilderError,
};

/// Which conversions a [`serialise`] call writes, and whether falsy values
/// are written too.
///
/// [`serialise`]: crate::builder::Builder::serialise
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SerializationConfiguration {
    conversions: Vec<&'static Conversion>,
    defaults: bool,
}

impl SerializationConfiguration {
    /// Snapshot the output conversions of `descriptors`, sorted by priority.
    pub fn new<'a>(
        descriptors: impl IntoIterator<Item = &'a Arc<ConversionDescriptor>>,
        defaults: bool,
    ) -> Self {
        let mut conversions: Vec<&'static Conversion> = Vec::new();
        for descriptor in descriptors {
            if !conversions.contains(&descriptor.output_conversion) {
                conversions.push(descriptor.output_conversion);
            }
        }
        conversions.sort_by_key(|conversion| conversion.sort_priority);

        Self {
            conversions,
            defaults,
        }
    }

    /// Resolve the descriptors by attribute name on `builder_type`.
    pub fn from_names(
        builder_type: &BuilderType,
        names: &[&str],
        defaults: bool,
    ) -> Result<Self, BuilderError> {
        let descriptors = names
            .iter()
            .map(|name| {
                builder_type
                    .descriptor(name)
                    .ok_or_else(|| BuilderError::UnknownAttribute {
                        type_name: builder_type.name(),
                        name: (*name).to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(descriptors, defaults))
    }

    pub fn conversions(&self) -> &[&'static Conversion] {
        &self.conversions
    }

    pub fn defaults(&self) -> bool {
        self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::test::{CONVERSION_NUMBER, CONVERSION_TEXT, TEST_BUILDER};

    #[test]
    fn sorted_and_deduplicated_output_conversions() {
        let configuration = SerializationConfiguration::from_names(
            &TEST_BUILDER,
            &["text", "number_text", "number"],
            true,
        )
        .unwrap();
        assert_eq!(configuration.conversions(), [&CONVERSION_NUMBER, &CONVERSION_TEXT]);
        assert!(configuration.defaults());
    }

    #[test]
    fn unknown_name() {
        let error =
            SerializationConfiguration::from_names(&TEST_BUILDER, &["missing"], false).unwrap_err();
        assert!(matches!(error, BuilderError::UnknownAttribute { .. }));
    }
}
