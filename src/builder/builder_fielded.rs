use std::sync::LazyLock;

use crate::builder::{
    builder_base::{Builder, BUILDER_BASE},
    builder_type::{BuilderType, Namespace},
    error::BuilderError,
    value::Value,
};

/// Builder type rejecting every parameter it has no field for.
pub static BUILDER_FIELDED: LazyLock<BuilderType> = LazyLock::new(|| {
    let namespace = Namespace::new()
        .positional_unknown(reject_positional_unknown)
        .keyword_unknown(reject_keyword_unknown);

    match BuilderType::new("BuilderFielded", &[&BUILDER_BASE], namespace) {
        Ok(builder_type) => builder_type,
        Err(error) => panic!("{error}"),
    }
});

pub fn reject_positional_unknown(builder: &mut Builder, value: Value) -> Result<(), BuilderError> {
    Err(BuilderError::type_mismatch(
        format!("{} positional parameter", builder.builder_type().name()),
        "any value matching a field of the builder",
        &value,
    ))
}

pub fn reject_keyword_unknown(_builder: &mut Builder, key: &str, value: Value) -> Result<(), BuilderError> {
    Err(BuilderError::type_mismatch(
        key,
        "any field name of the builder",
        &value,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_every_parameter() {
        let error = BUILDER_FIELDED.instantiate([Value::Integer(1)], []).unwrap_err();
        assert_eq!(
            error.to_string(),
            "`BuilderFielded positional parameter` can be any value matching a field of the builder, got int; Integer(1)",
        );

        let error = BUILDER_FIELDED
            .instantiate([], [("name", Value::from("x"))])
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "`name` can be any field name of the builder, got str; String(\"x\")",
        );
    }

    #[test]
    fn base_accepts_the_same_parameters() {
        let builder = BUILDER_BASE
            .instantiate([Value::Integer(1)], [("name", Value::from("x"))])
            .unwrap();
        assert_eq!(builder, Builder::new(&BUILDER_BASE));
    }
}
