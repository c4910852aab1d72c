//! Dynamic input values and their runtime type hierarchy.
//!
//! Builders accept loosely-typed input: a single positional call may receive
//! a string, an embed, a list of stickers or a whole other builder. [`Value`]
//! is the closed set of shapes a builder can be fed, and [`ValueType`] is the
//! runtime type conversions match on.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use crate::builder::builder_base::Builder;
use crate::types::{
    AllowedMentions, Attachment, Embed, MessageFlags, MessageReference, Sticker, VoiceAttachment,
};

/// Runtime type of a [`Value`].
///
/// Types form a single-parent hierarchy: [`ValueType::Bool`] and
/// [`ValueType::MessageFlags`] are both subtypes of [`ValueType::Integer`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueType {
    Null,
    Bool,
    Integer,
    String,
    Bytes,
    List,
    Tuple,
    Map,
    Embed,
    MessageFlags,
    AllowedMentions,
    Attachment,
    Sticker,
    MessageReference,
    VoiceAttachment,
    Builder,
}

impl ValueType {
    /// Direct supertype, if any.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Bool | Self::MessageFlags => Some(Self::Integer),
            _ => None,
        }
    }

    /// Whether `self` is `other` or derives from it.
    pub fn is_subtype_of(self, other: Self) -> bool {
        let mut current = Some(self);
        while let Some(value_type) = current {
            if value_type == other {
                return true;
            }
            current = value_type.parent();
        }
        false
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "int",
            Self::String => "str",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Map => "dict",
            Self::Embed => "Embed",
            Self::MessageFlags => "MessageFlags",
            Self::AllowedMentions => "AllowedMentions",
            Self::Attachment => "Attachment",
            Self::Sticker => "Sticker",
            Self::MessageReference => "MessageReference",
            Self::VoiceAttachment => "VoiceAttachment",
            Self::Builder => "Builder",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// A value fed to, stored in, or read from a builder.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Embed(Embed),
    MessageFlags(MessageFlags),
    AllowedMentions(AllowedMentions),
    Attachment(Attachment),
    Sticker(Sticker),
    MessageReference(MessageReference),
    VoiceAttachment(VoiceAttachment),
    Builder(Box<Builder>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::Integer(_) => ValueType::Integer,
            Self::String(_) => ValueType::String,
            Self::Bytes(_) => ValueType::Bytes,
            Self::List(_) => ValueType::List,
            Self::Tuple(_) => ValueType::Tuple,
            Self::Map(_) => ValueType::Map,
            Self::Embed(_) => ValueType::Embed,
            Self::MessageFlags(_) => ValueType::MessageFlags,
            Self::AllowedMentions(_) => ValueType::AllowedMentions,
            Self::Attachment(_) => ValueType::Attachment,
            Self::Sticker(_) => ValueType::Sticker,
            Self::MessageReference(_) => ValueType::MessageReference,
            Self::VoiceAttachment(_) => ValueType::VoiceAttachment,
            Self::Builder(_) => ValueType::Builder,
        }
    }

    /// Truthiness: null, zero, empty strings and empty collections are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(value) => *value,
            Self::Integer(value) => *value != 0,
            Self::String(value) => !value.is_empty(),
            Self::Bytes(value) => !value.is_empty(),
            Self::List(values) | Self::Tuple(values) => !values.is_empty(),
            Self::Map(values) => !values.is_empty(),
            Self::MessageFlags(flags) => !flags.is_empty(),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Integer value of integers and of every integer subtype.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Bool(value) => Some(i64::from(*value)),
            Self::MessageFlags(flags) => Some(flags.to_integer()),
            _ => None,
        }
    }

    /// Elements of a list or of a tuple.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) | Self::Tuple(values) => Some(values),
            _ => None,
        }
    }

    /// Representation used in error messages.
    pub fn repr(&self) -> String {
        match self {
            Self::Bytes(data) => format!("<{} bytes>", data.len()),
            Self::VoiceAttachment(voice) => format!("<voice attachment, {} bytes>", voice.data.len()),
            value => format!("{value:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Map(value)
    }
}

impl From<Embed> for Value {
    fn from(value: Embed) -> Self {
        Self::Embed(value)
    }
}

impl From<MessageFlags> for Value {
    fn from(value: MessageFlags) -> Self {
        Self::MessageFlags(value)
    }
}

impl From<AllowedMentions> for Value {
    fn from(value: AllowedMentions) -> Self {
        Self::AllowedMentions(value)
    }
}

impl From<Attachment> for Value {
    fn from(value: Attachment) -> Self {
        Self::Attachment(value)
    }
}

impl From<Sticker> for Value {
    fn from(value: Sticker) -> Self {
        Self::Sticker(value)
    }
}

impl From<MessageReference> for Value {
    fn from(value: MessageReference) -> Self {
        Self::MessageReference(value)
    }
}

impl From<VoiceAttachment> for Value {
    fn from(value: VoiceAttachment) -> Self {
        Self::VoiceAttachment(value)
    }
}

impl From<Builder> for Value {
    fn from(value: Builder) -> Self {
        Self::Builder(Box::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Value: Clone, Send, Sync);

    #[test]
    fn integer_subtypes() {
        assert!(ValueType::Bool.is_subtype_of(ValueType::Integer));
        assert!(ValueType::MessageFlags.is_subtype_of(ValueType::Integer));
        assert!(ValueType::Integer.is_subtype_of(ValueType::Integer));
        assert!(!ValueType::Integer.is_subtype_of(ValueType::Bool));
        assert!(!ValueType::String.is_subtype_of(ValueType::Integer));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::List(Vec::new()).is_truthy());
        assert!(!Value::MessageFlags(MessageFlags::empty()).is_truthy());
        assert!(Value::from("a").is_truthy());
        assert!(Value::Embed(Embed::new()).is_truthy());
    }

    #[test]
    fn integer_view_of_subtypes() {
        assert_eq!(Value::Bool(true).as_integer(), Some(1));
        assert_eq!(
            Value::MessageFlags(MessageFlags::SUPPRESS_EMBEDS).as_integer(),
            Some(1 << 2),
        );
        assert_eq!(Value::from("1").as_integer(), None);
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::default(), Value::Null);
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
