use thiserror::Error;

use crate::builder::value::ValueType;

/// Error returned by builder type creation, ingestion and serialisation.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A builder type asked for an attribute that neither its namespace nor
    /// any of its bases provide, or that has the wrong shape.
    #[error("`{type_name}` can not resolve `{attribute}` as {expected}")]
    UnresolvedAttribute {
        type_name: &'static str,
        attribute: &'static str,
        expected: &'static str,
    },

    /// The bases of a builder type have no consistent resolution order.
    #[error("`{type_name}` has bases with no consistent resolution order near `{blocked}`")]
    InconsistentHierarchy {
        type_name: &'static str,
        blocked: &'static str,
    },

    /// The field has no validator, so it can not be assigned directly.
    #[error("field `{0}` is not settable")]
    NotSettable(&'static str),

    /// The field is write-only.
    #[error("field `{0}` is not gettable")]
    NotGettable(&'static str),

    /// A value did not pass the field's validator.
    #[error("`{name}` can be {expected}, got {value_type}; {value_repr}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        value_type: ValueType,
        value_repr: String,
    },

    /// The builder type has no attribute under this name.
    #[error("`{type_name}` has no attribute `{name}`")]
    UnknownAttribute {
        type_name: &'static str,
        name: String,
    },

    /// Another builder was merged into one of an unrelated type.
    #[error("can not merge a `{received}` builder into a `{expected}` builder")]
    IncompatibleBuilder {
        expected: &'static str,
        received: &'static str,
    },

    /// A field imposed an extra invariant during serialisation and it did not
    /// hold.
    #[error("{0}")]
    InvalidValue(String),

    #[error("serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BuilderError {
    /// Build a [`BuilderError::TypeMismatch`] for the given value.
    pub fn type_mismatch(
        name: impl Into<String>,
        expected: &'static str,
        value: &crate::builder::Value,
    ) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected,
            value_type: value.value_type(),
            value_repr: value.repr(),
        }
    }
}
