use serde_json::{json, Value as JsonValue};

use crate::builder::{BuilderError, Conversion, ConversionKind, Payload, Value, ValueType};
use crate::types::{MessageFlags, VoiceAttachment};

fn validator(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::VoiceAttachment(_) => Some(value.clone()),
        _ => None,
    }
}

/// A voice message carries nothing but its recording and flags.
fn serializer_putter(payload: Payload, _defaults: bool, value: &Value) -> Result<Payload, BuilderError> {
    let Value::VoiceAttachment(voice) = value else {
        return Ok(payload);
    };

    if let Some(key) = payload.json().keys().find(|key| *key != "flags") {
        return Err(BuilderError::InvalidValue(format!(
            "a voice attachment must be the only field of the message, got `{key}`"
        )));
    }
    if payload.as_multipart().is_some_and(|form| !form.files().is_empty()) {
        return Err(BuilderError::InvalidValue(
            "a voice attachment can not be sent with other files".to_owned(),
        ));
    }

    let flags = payload.get("flags").and_then(JsonValue::as_i64).unwrap_or(0)
        | MessageFlags::IS_VOICE_MESSAGE.to_integer();

    let mut form = payload.into_multipart();
    let index = form.add_file(VoiceAttachment::FILE_NAME, voice.data.clone());

    let mut payload = Payload::Multipart(form);
    payload.insert("flags", JsonValue::from(flags));
    payload.insert(
        "attachments",
        json!([{
            "id": index,
            "filename": VoiceAttachment::FILE_NAME,
            "duration_secs": voice.duration.as_secs_f64(),
            "waveform": voice.waveform,
        }]),
    );
    Ok(payload)
}

pub static CONVERSION_VOICE_ATTACHMENT: Conversion = Conversion {
    expected_types_messages: "`null`, `VoiceAttachment`",
    get_default: Value::Null,
    get_processor: None,
    kind: ConversionKind::Field,
    name: "voice_attachment",
    name_aliases: None,
    output_conversion: None,
    serializer_key: None,
    serializer_optional: None,
    serializer_putter: Some(serializer_putter),
    serializer_required: None,
    set_identifier: None,
    set_listing_identifier: None,
    set_merger: None,
    set_type: Some(ValueType::VoiceAttachment),
    set_type_processor: None,
    set_validator: Some(validator),
    sort_priority: 1100,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn voice() -> Value {
        Value::from(VoiceAttachment::new(vec![1, 2, 3], Duration::from_millis(1500), "AAAA"))
    }

    #[test]
    fn forces_multipart_and_voice_flag() {
        let mut payload = Payload::default();
        payload.insert("flags", JsonValue::from(MessageFlags::SUPPRESS_NOTIFICATIONS.to_integer()));

        let payload = serializer_putter(payload, false, &voice()).unwrap();
        let form = payload.as_multipart().unwrap();
        assert_eq!(form.files()[0].filename, VoiceAttachment::FILE_NAME);
        assert_eq!(
            form.payload_json().get("flags"),
            Some(&json!((1 << 12) | (1 << 13))),
        );
        assert_eq!(
            form.payload_json()["attachments"][0]["duration_secs"],
            json!(1.5),
        );
    }

    #[test]
    fn rejects_other_fields() {
        let mut payload = Payload::default();
        payload.insert("content", json!("hi"));
        let error = serializer_putter(payload, false, &voice()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "a voice attachment must be the only field of the message, got `content`",
        );
    }
}
