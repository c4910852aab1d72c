//! Builder types and their one-time dispatch table construction.
//!
//! A [`BuilderType`] is created once from a declared [`Namespace`] and its
//! base types. Creation collects every conversion the type declares or
//! inherits, binds each one into a [`ConversionDescriptor`], and partitions
//! the descriptors into dispatch tables:
//!
//! | Table | Holds descriptors whose conversion has | Keyed / ordered by |
//! |---|---|---|
//! | positional | `set_identifier` | `sort_priority` |
//! | keyword | `set_validator` | every name and alias |
//! | typed | `set_type` | the exact [`ValueType`] |
//! | typed ordered | `set_type` | `sort_priority` |
//! | listing | `set_listing_identifier` | `sort_priority` |
//!
//! The typed table keeps growing after creation: subtype matches are
//! memoized under their exact runtime type.

use parking_lot::RwLock;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};
use tracing::{debug, trace, warn};

use crate::builder::{
    builder_base::Builder,
    conversion::Conversion,
    descriptor::{ConversionDescriptor, Getter, Setter},
    error::BuilderError,
    value::{Value, ValueType},
};

/// Hook called with a positional value no conversion recognised.
pub type PositionalUnknownHook = fn(&mut Builder, Value) -> Result<(), BuilderError>;
/// Hook called with a keyword no conversion is named after.
pub type KeywordUnknownHook = fn(&mut Builder, &str, Value) -> Result<(), BuilderError>;

pub const POSITIONAL_UNKNOWN: &str = "with_positional_parameter_unknown";
pub const KEYWORD_UNKNOWN: &str = "with_keyword_parameter_unknown";

/// An attribute of a builder type.
#[derive(Clone)]
pub enum Attribute {
    /// A declared field. Replaced by a [`Attribute::Descriptor`] once the
    /// type is created.
    Conversion(&'static Conversion),
    Descriptor(Arc<ConversionDescriptor>),
    Getter(Getter),
    Setter(Setter),
    PositionalUnknown(PositionalUnknownHook),
    KeywordUnknown(KeywordUnknownHook),
    /// Any other attribute. Declaring one under the name of an inherited field
    /// removes that field.
    Constant(Value),
}

impl Debug for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Conversion(conversion) => f.debug_tuple("Conversion").field(&conversion.name).finish(),
            Self::Descriptor(descriptor) => f.debug_tuple("Descriptor").field(descriptor).finish(),
            Self::Getter(_) => f.write_str("Getter"),
            Self::Setter(_) => f.write_str("Setter"),
            Self::PositionalUnknown(_) => f.write_str("PositionalUnknown"),
            Self::KeywordUnknown(_) => f.write_str("KeywordUnknown"),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
        }
    }
}

/// Declared body of a builder type.
///
/// Later declarations of the same name replace earlier ones in place.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    attributes: Vec<(&'static str, Attribute)>,
    conversions_default: Vec<&'static Conversion>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named field.
    pub fn conversion(self, name: &'static str, conversion: &'static Conversion) -> Self {
        self.attribute(name, Attribute::Conversion(conversion))
    }

    pub fn getter(self, name: &'static str, getter: Getter) -> Self {
        self.attribute(name, Attribute::Getter(getter))
    }

    pub fn setter(self, name: &'static str, setter: Setter) -> Self {
        self.attribute(name, Attribute::Setter(setter))
    }

    pub fn positional_unknown(self, hook: PositionalUnknownHook) -> Self {
        self.attribute(POSITIONAL_UNKNOWN, Attribute::PositionalUnknown(hook))
    }

    pub fn keyword_unknown(self, hook: KeywordUnknownHook) -> Self {
        self.attribute(KEYWORD_UNKNOWN, Attribute::KeywordUnknown(hook))
    }

    pub fn constant(self, name: &'static str, value: Value) -> Self {
        self.attribute(name, Attribute::Constant(value))
    }

    /// Declare unnamed fields which only take part in positional matching.
    pub fn conversions_default(
        mut self,
        conversions: impl IntoIterator<Item = &'static Conversion>,
    ) -> Self {
        self.conversions_default.extend(conversions);
        self
    }

    pub fn attribute(mut self, name: &'static str, attribute: Attribute) -> Self {
        self.insert(name, attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|(attribute_name, _)| *attribute_name == name)
            .map(|(_, attribute)| attribute)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Attribute)> {
        self.attributes.iter().map(|(name, attribute)| (*name, attribute))
    }

    fn insert(&mut self, name: &'static str, attribute: Attribute) {
        match self.attributes.iter_mut().find(|(attribute_name, _)| *attribute_name == name) {
            Some((_, slot)) => *slot = attribute,
            None => self.attributes.push((name, attribute)),
        }
    }
}

/// A builder type: resolved attributes plus dispatch tables.
pub struct BuilderType {
    name: &'static str,
    bases: Vec<&'static BuilderType>,
    /// Linearized ancestors, nearest first, excluding the type itself.
    ancestors: Vec<&'static BuilderType>,
    attributes: Namespace,
    conversions_assigned: Vec<(&'static str, &'static Conversion)>,
    conversions_default: Vec<&'static Conversion>,
    descriptors_positional: Vec<Arc<ConversionDescriptor>>,
    descriptors_keyword: HashMap<&'static str, Arc<ConversionDescriptor>>,
    descriptors_typed: RwLock<HashMap<ValueType, Arc<ConversionDescriptor>>>,
    descriptors_typed_ordered: Vec<Arc<ConversionDescriptor>>,
    descriptors_listing: Vec<Arc<ConversionDescriptor>>,
    positional_unknown: PositionalUnknownHook,
    keyword_unknown: KeywordUnknownHook,
}

impl BuilderType {
    /// Create a builder type from its bases and declared namespace.
    ///
    /// # Errors
    ///
    /// Fails if the bases can not be linearized, or if a getter, setter or
    /// unknown-parameter hook can not be resolved from the namespace or the
    /// bases.
    pub fn new(
        name: &'static str,
        bases: &[&'static BuilderType],
        namespace: Namespace,
    ) -> Result<Self, BuilderError> {
        let ancestors = linearize(name, bases)?;

        let mut conversions_default: Vec<&'static Conversion> = Vec::new();
        for conversion in bases
            .iter()
            .flat_map(|base| base.conversions_default.iter().copied())
            .chain(namespace.conversions_default.iter().copied())
        {
            if !conversions_default.contains(&conversion) {
                conversions_default.push(conversion);
            }
        }

        let mut conversions_assigned: Vec<(&'static str, &'static Conversion)> = Vec::new();
        for base in bases {
            for &(attribute_name, conversion) in &base.conversions_assigned {
                if !namespace.contains(attribute_name) {
                    assign(&mut conversions_assigned, attribute_name, conversion);
                }
            }
        }
        for (attribute_name, attribute) in namespace.iter() {
            if let Attribute::Conversion(conversion) = attribute {
                assign(&mut conversions_assigned, attribute_name, *conversion);
            }
        }

        let request = |attribute_name: &'static str| -> Option<Attribute> {
            namespace.get(attribute_name).cloned().or_else(|| {
                ancestors
                    .iter()
                    .find_map(|ancestor| ancestor.attributes.get(attribute_name).cloned())
            })
        };

        let mut descriptors = Vec::with_capacity(conversions_default.len() + conversions_assigned.len());
        for &conversion in &conversions_default {
            descriptors.push(Arc::new(ConversionDescriptor::new(None, conversion, name, request)?));
        }
        for &(attribute_name, conversion) in &conversions_assigned {
            descriptors.push(Arc::new(ConversionDescriptor::new(
                Some(attribute_name),
                conversion,
                name,
                request,
            )?));
        }

        let positional_unknown = match request(POSITIONAL_UNKNOWN) {
            Some(Attribute::PositionalUnknown(hook)) => hook,
            _ => {
                return Err(BuilderError::UnresolvedAttribute {
                    type_name: name,
                    attribute: POSITIONAL_UNKNOWN,
                    expected: "a positional parameter hook",
                })
            }
        };
        let keyword_unknown = match request(KEYWORD_UNKNOWN) {
            Some(Attribute::KeywordUnknown(hook)) => hook,
            _ => {
                return Err(BuilderError::UnresolvedAttribute {
                    type_name: name,
                    attribute: KEYWORD_UNKNOWN,
                    expected: "a keyword parameter hook",
                })
            }
        };

        let mut attributes = namespace;
        for descriptor in &descriptors {
            if let Some(attribute_name) = descriptor.attribute_name {
                attributes.insert(attribute_name, Attribute::Descriptor(descriptor.clone()));
            }
        }

        let descriptors_positional =
            sorted_where(&descriptors, |conversion| conversion.set_identifier.is_some());
        let descriptors_typed_ordered =
            sorted_where(&descriptors, |conversion| conversion.set_type.is_some());
        let descriptors_listing =
            sorted_where(&descriptors, |conversion| conversion.set_listing_identifier.is_some());

        let mut descriptors_keyword: HashMap<&'static str, Arc<ConversionDescriptor>> = HashMap::new();
        for descriptor in descriptors
            .iter()
            .filter(|descriptor| descriptor.conversion.set_validator.is_some())
        {
            for keyword in descriptor.conversion.iter_names() {
                if let Some(previous) = descriptors_keyword.insert(keyword, descriptor.clone()) {
                    if previous.conversion != descriptor.conversion {
                        warn!(
                            builder_type = name,
                            keyword,
                            previous = previous.conversion.name,
                            current = descriptor.conversion.name,
                            "keyword shared by two conversions, the later one wins"
                        );
                    }
                }
            }
        }

        let mut descriptors_typed = HashMap::new();
        for descriptor in &descriptors {
            if let Some(set_type) = descriptor.conversion.set_type {
                descriptors_typed.insert(set_type, descriptor.clone());
            }
        }

        debug!(
            builder_type = name,
            assigned = conversions_assigned.len(),
            default = conversions_default.len(),
            positional = descriptors_positional.len(),
            keyword = descriptors_keyword.len(),
            typed = descriptors_typed.len(),
            listing = descriptors_listing.len(),
            "created builder type"
        );

        Ok(Self {
            name,
            bases: bases.to_vec(),
            ancestors,
            attributes,
            conversions_assigned,
            conversions_default,
            descriptors_positional,
            descriptors_keyword,
            descriptors_typed: RwLock::new(descriptors_typed),
            descriptors_typed_ordered,
            descriptors_listing,
            positional_unknown,
            keyword_unknown,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bases(&self) -> &[&'static BuilderType] {
        &self.bases
    }

    /// Look an attribute up on this type, then on its ancestors.
    pub fn lookup(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name).or_else(|| {
            self.ancestors
                .iter()
                .find_map(|ancestor| ancestor.attributes.get(name))
        })
    }

    /// The descriptor bound under an attribute name.
    pub fn descriptor(&self, name: &str) -> Option<&Arc<ConversionDescriptor>> {
        match self.lookup(name)? {
            Attribute::Descriptor(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Whether `self` is `other` or derives from it.
    pub fn is_subtype_of(&self, other: &BuilderType) -> bool {
        std::ptr::eq(self, other)
            || self
                .ancestors
                .iter()
                .any(|ancestor| std::ptr::eq(*ancestor, other))
    }

    pub fn conversions_assigned(&self) -> &[(&'static str, &'static Conversion)] {
        &self.conversions_assigned
    }

    pub fn conversions_default(&self) -> &[&'static Conversion] {
        &self.conversions_default
    }

    pub fn descriptors_positional(&self) -> &[Arc<ConversionDescriptor>] {
        &self.descriptors_positional
    }

    pub fn descriptors_keyword(&self) -> &HashMap<&'static str, Arc<ConversionDescriptor>> {
        &self.descriptors_keyword
    }

    pub fn descriptors_typed_ordered(&self) -> &[Arc<ConversionDescriptor>] {
        &self.descriptors_typed_ordered
    }

    pub fn descriptors_listing(&self) -> &[Arc<ConversionDescriptor>] {
        &self.descriptors_listing
    }

    /// Exact type match, including memoized subtype matches.
    pub fn typed_descriptor(&self, value_type: ValueType) -> Option<Arc<ConversionDescriptor>> {
        self.descriptors_typed.read().get(&value_type).cloned()
    }

    /// Memoize a subtype match under its exact runtime type.
    pub(crate) fn promote_typed(&self, value_type: ValueType, descriptor: Arc<ConversionDescriptor>) {
        trace!(
            builder_type = self.name,
            value_type = value_type.name(),
            conversion = descriptor.conversion.name,
            "memoizing subtype match"
        );
        self.descriptors_typed.write().insert(value_type, descriptor);
    }

    pub(crate) fn positional_unknown(&self) -> PositionalUnknownHook {
        self.positional_unknown
    }

    pub(crate) fn keyword_unknown(&self) -> KeywordUnknownHook {
        self.keyword_unknown
    }
}

impl Debug for BuilderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BuilderType")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|base| base.name).collect::<Vec<_>>(),
            )
            .field(
                "conversions_assigned",
                &self
                    .conversions_assigned
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Insert into an ordered mapping; overwriting keeps the original position.
fn assign(
    mapping: &mut Vec<(&'static str, &'static Conversion)>,
    attribute_name: &'static str,
    conversion: &'static Conversion,
) {
    match mapping.iter_mut().find(|(name, _)| *name == attribute_name) {
        Some((_, slot)) => *slot = conversion,
        None => mapping.push((attribute_name, conversion)),
    }
}

fn sorted_where(
    descriptors: &[Arc<ConversionDescriptor>],
    predicate: impl Fn(&Conversion) -> bool,
) -> Vec<Arc<ConversionDescriptor>> {
    let mut selected = descriptors
        .iter()
        .filter(|descriptor| predicate(descriptor.conversion))
        .cloned()
        .collect::<Vec<_>>();
    selected.sort_by_key(|descriptor| descriptor.conversion.sort_priority);
    selected
}

/// C3 linearization of the bases.
fn linearize(
    name: &'static str,
    bases: &[&'static BuilderType],
) -> Result<Vec<&'static BuilderType>, BuilderError> {
    let mut sequences = bases
        .iter()
        .map(|base| {
            let mut sequence = vec![*base];
            sequence.extend(base.ancestors.iter().copied());
            sequence
        })
        .collect::<Vec<_>>();
    sequences.push(bases.to_vec());

    let mut linearized: Vec<&'static BuilderType> = Vec::new();
    loop {
        sequences.retain(|sequence| !sequence.is_empty());
        let Some(first) = sequences.first() else {
            return Ok(linearized);
        };

        let head = sequences
            .iter()
            .map(|sequence| sequence[0])
            .find(|candidate| {
                !sequences
                    .iter()
                    .any(|sequence| sequence[1..].iter().any(|other| std::ptr::eq(*other, *candidate)))
            });

        let Some(head) = head else {
            return Err(BuilderError::InconsistentHierarchy {
                type_name: name,
                blocked: first[0].name,
            });
        };

        linearized.push(head);
        for sequence in &mut sequences {
            if std::ptr::eq(sequence[0], head) {
                sequence.remove(0);
            }
        }
    }
}
