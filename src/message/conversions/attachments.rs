//! Files of a message.
//!
//! Accepted shapes, alone or in a list:
//!
//! - raw bytes,
//! - `(name, bytes)` or `(name, bytes, description)` tuples,
//! - an [`Attachment`] that was already uploaded,
//! - a map of name to bytes.
//!
//! Everything is stored as a list of `(name | null, bytes, description | null)`
//! tuples and attachment references, in input order.
//!
//! [`Attachment`]: crate::types::Attachment

use serde_json::Value as JsonValue;

use crate::builder::{BuilderError, Conversion, ConversionKind, JsonMap, Payload, Value, ValueType};
use crate::message::conversions::{merge_lists, to_json};

fn upload(name: Value, data: Value, description: Value) -> Value {
    Value::Tuple(vec![name, data, description])
}

fn normalize_item(value: &Value) -> Option<Value> {
    match value {
        Value::Bytes(_) => Some(upload(Value::Null, value.clone(), Value::Null)),
        Value::Attachment(_) => Some(value.clone()),
        Value::Tuple(parts) => match parts.as_slice() {
            [name @ Value::String(_), data @ Value::Bytes(_)] => {
                Some(upload(name.clone(), data.clone(), Value::Null))
            }
            [name @ Value::String(_), data @ Value::Bytes(_), description @ (Value::String(_) | Value::Null)] => {
                Some(upload(name.clone(), data.clone(), description.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

fn normalize_map(value: &Value) -> Option<Vec<Value>> {
    let Value::Map(files) = value else {
        return None;
    };
    files
        .iter()
        .map(|(name, data)| match data {
            Value::Bytes(_) => Some(upload(Value::from(name.as_str()), data.clone(), Value::Null)),
            _ => None,
        })
        .collect()
}

fn normalize(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Map(_) => normalize_map(value),
        Value::List(values) => values.iter().try_fold(Vec::new(), |mut items, value| {
            match value {
                Value::Map(_) => items.extend(normalize_map(value)?),
                value => items.push(normalize_item(value)?),
            }
            Some(items)
        }),
        value => normalize_item(value).map(|item| vec![item]),
    }
}

fn type_processor(value: Value) -> Value {
    Value::List(vec![upload(Value::Null, value, Value::Null)])
}

fn identifier(value: &Value) -> Option<Value> {
    match value {
        Value::Tuple(_) | Value::Attachment(_) | Value::Map(_) => normalize(value).map(Value::List),
        _ => None,
    }
}

fn listing_identifier(value: &Value) -> Option<Value> {
    match value {
        Value::List(_) => normalize(value).map(Value::List),
        _ => None,
    }
}

fn validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        value => normalize(value).map(Value::List),
    }
}

fn invalid(item: &Value) -> BuilderError {
    BuilderError::InvalidValue(format!("not an attachment: {}", item.repr()))
}

/// Writes the `attachments` entries. New uploads switch the payload to
/// multipart and are referenced by their file index.
fn serializer_putter(payload: Payload, defaults: bool, value: &Value) -> Result<Payload, BuilderError> {
    let items = value.as_sequence().unwrap_or_default();
    if items.is_empty() {
        let mut payload = payload;
        if defaults {
            payload.insert("attachments", JsonValue::Array(Vec::new()));
        }
        return Ok(payload);
    }

    let offset = payload.as_multipart().map_or(0, |form| form.files().len());
    let mut files = Vec::new();
    let mut entries = Vec::with_capacity(items.len());

    for item in items {
        match item {
            Value::Attachment(attachment) => entries.push(to_json(attachment)?),
            Value::Tuple(parts) => {
                let [name, Value::Bytes(data), description] = parts.as_slice() else {
                    return Err(invalid(item));
                };
                let index = offset + files.len();
                let filename = name
                    .as_str()
                    .map_or_else(|| format!("file-{index}"), str::to_owned);

                let mut entry = JsonMap::new();
                entry.insert("id".to_owned(), JsonValue::from(index));
                entry.insert("filename".to_owned(), JsonValue::from(filename.as_str()));
                if let Some(description) = description.as_str() {
                    entry.insert("description".to_owned(), JsonValue::from(description));
                }
                entries.push(JsonValue::Object(entry));
                files.push((filename, data.clone()));
            }
            item => return Err(invalid(item)),
        }
    }

    let mut payload = if files.is_empty() {
        payload
    } else {
        let mut form = payload.into_multipart();
        for (filename, data) in files {
            form.add_file(filename, data);
        }
        Payload::Multipart(form)
    };
    payload.insert("attachments", JsonValue::Array(entries));
    Ok(payload)
}

pub static CONVERSION_ATTACHMENTS: Conversion = Conversion {
    expected_types_messages: "`null`, `bytes`, `tuple` (`str`, `bytes`[, `str`]), `Attachment`, \
        `dict` of (`str`, `bytes`) items, `list` of the previous",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "attachments",
    name_aliases: None,
    output_conversion: None,
    serializer_key: Some("attachments"),
    serializer_optional: None,
    serializer_putter: Some(serializer_putter),
    serializer_required: None,
    set_identifier: Some(identifier),
    set_listing_identifier: Some(listing_identifier),
    set_merger: Some(merge_lists),
    set_type: Some(ValueType::Bytes),
    set_type_processor: Some(type_processor),
    set_validator: Some(validator),
    sort_priority: 1000,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attachment, Id};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn shapes_are_normalized() {
        let mut files = BTreeMap::new();
        files.insert("b.txt".to_owned(), Value::from(b"b".to_vec()));

        let value = Value::List(vec![
            Value::from(b"raw".to_vec()),
            Value::Tuple(vec![Value::from("a.txt"), Value::from(b"a".to_vec())]),
            Value::Map(files),
        ]);
        let Some(Value::List(items)) = validator(&value) else {
            panic!("not normalized");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[2],
            upload(Value::from("b.txt"), Value::from(b"b".to_vec()), Value::Null),
        );
    }

    #[test]
    fn unknown_shapes_are_rejected() {
        assert_eq!(validator(&Value::from("a.txt")), None);
        assert_eq!(
            validator(&Value::Tuple(vec![Value::from("a.txt"), Value::from("a")])),
            None,
        );
        assert_eq!(identifier(&Value::List(Vec::new())), None);
    }

    #[test]
    fn references_only_stay_json() {
        let value = Value::List(vec![Value::from(Attachment::new(Id::new(5), "cat.png"))]);
        let payload = serializer_putter(Payload::default(), false, &value).unwrap();
        assert!(!payload.is_multipart());
        assert_eq!(
            payload.get("attachments"),
            Some(&json!([{"id": "5", "filename": "cat.png"}])),
        );
    }

    #[test]
    fn nothing_stored_writes_empty_list_with_defaults() {
        let payload = serializer_putter(Payload::default(), true, &Value::Null).unwrap();
        assert_eq!(payload.get("attachments"), Some(&json!([])));
        let payload = serializer_putter(Payload::default(), false, &Value::Null).unwrap();
        assert!(payload.is_empty());
    }
}
