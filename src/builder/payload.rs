//! Output of [`Builder::serialise`]: a JSON body or a multipart form.
//!
//! Serialisation starts out as a plain JSON map. A conversion that carries
//! binary data (attachments, voice messages) switches the payload to a
//! [`MultipartForm`], folding everything accumulated so far into the form's
//! `payload_json` field.
//!
//! [`Builder::serialise`]: crate::builder::Builder::serialise

use serde_json::{Map, Value as JsonValue};

use crate::builder::error::BuilderError;

pub type JsonMap = Map<String, JsonValue>;

/// Request body produced by serialising a builder.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(JsonMap),
    Multipart(MultipartForm),
}

impl Default for Payload {
    fn default() -> Self {
        Self::Json(JsonMap::new())
    }
}

impl Payload {
    /// Insert a JSON field. Once the payload is multipart the field lands in
    /// `payload_json`.
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.json_mut().insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.json().get(key)
    }

    /// The JSON fields, wherever they live.
    pub fn json(&self) -> &JsonMap {
        match self {
            Self::Json(map) => map,
            Self::Multipart(form) => &form.payload_json,
        }
    }

    pub fn json_mut(&mut self) -> &mut JsonMap {
        match self {
            Self::Json(map) => map,
            Self::Multipart(form) => &mut form.payload_json,
        }
    }

    /// Whether nothing was written yet.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Json(map) => map.is_empty(),
            Self::Multipart(form) => form.payload_json.is_empty() && form.files.is_empty(),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            Self::Json(_) => None,
            Self::Multipart(form) => Some(form),
        }
    }

    /// Switch to multipart, keeping the accumulated JSON as `payload_json`.
    pub fn into_multipart(self) -> MultipartForm {
        match self {
            Self::Json(map) => MultipartForm::new(map),
            Self::Multipart(form) => form,
        }
    }

    /// The payload as a JSON value, if it is not multipart.
    pub fn into_json(self) -> Option<JsonValue> {
        match self {
            Self::Json(map) => Some(JsonValue::Object(map)),
            Self::Multipart(_) => None,
        }
    }
}

/// One binary part of a multipart form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilePart {
    /// Form field name, `files[n]`.
    pub name: String,
    pub filename: String,
    pub data: Vec<u8>,
}

/// A `multipart/form-data` body with a `payload_json` field and file parts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartForm {
    payload_json: JsonMap,
    files: Vec<FilePart>,
}

/// Wire form of a [`MultipartForm`].
#[derive(Clone, Debug)]
pub struct EncodedForm {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl MultipartForm {
    pub fn new(payload_json: JsonMap) -> Self {
        Self {
            payload_json,
            files: Vec::new(),
        }
    }

    pub fn payload_json(&self) -> &JsonMap {
        &self.payload_json
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Add a file part named after its index, returning the index.
    pub fn add_file(&mut self, filename: impl Into<String>, data: Vec<u8>) -> usize {
        let index = self.files.len();
        self.files.push(FilePart {
            name: format!("files[{index}]"),
            filename: filename.into(),
            data,
        });
        index
    }

    /// Render the form with a random boundary.
    pub fn encode(&self) -> Result<EncodedForm, BuilderError> {
        let boundary = format!("HataBoundary{:016x}", rand::random::<u64>());
        let body = self.encode_with_boundary(&boundary)?;
        Ok(EncodedForm {
            content_type: format!("multipart/form-data; boundary={boundary}"),
            body,
        })
    }

    fn encode_with_boundary(&self, boundary: &str) -> Result<Vec<u8>, BuilderError> {
        let mut buf: Vec<u8> = Vec::new();

        let payload = serde_json::to_string(&self.payload_json)?;
        buf.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        buf.extend_from_slice(b"Content-Disposition: form-data; name=\"payload_json\"\r\n");
        buf.extend_from_slice(b"Content-Type: application/json\r\n\r\n");
        buf.extend_from_slice(payload.as_bytes());
        buf.extend_from_slice(b"\r\n");

        for file in &self.files {
            buf.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            buf.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    file.name,
                    file.filename.replace('"', "%22"),
                )
                .as_bytes(),
            );
            buf.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            buf.extend_from_slice(&file.data);
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        Ok(buf)
    }
}
