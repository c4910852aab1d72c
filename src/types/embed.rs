//! Rich embeds and an ergonomic builder for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rich embed attached to a message.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Embed {
    /// Create an empty embed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the embed would render as nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EmbedAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EmbedField {
    #[serde(default)]
    pub inline: bool,
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EmbedFooter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub text: String,
}

/// Image or thumbnail of an embed.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EmbedMedia {
    pub url: String,
}

/// Ergonomic builder for [`Embed`].
///
/// # Examples
///
/// ```
/// use hata_builder::types::EmbedBuilder;
///
/// let embed = EmbedBuilder::new()
///     .title("Hello")
///     .description("World")
///     .color(0x00FF00)
///     .build();
///
/// assert_eq!(embed.title.as_deref(), Some("Hello"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EmbedBuilder {
    inner: Embed,
}

impl EmbedBuilder {
    /// Create a new empty embed builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embed title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = Some(title.into());
        self
    }

    /// Set the embed description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    /// Set the embed color (as a 24-bit RGB integer, e.g. `0xFF6600`).
    pub fn color(mut self, color: u32) -> Self {
        self.inner.color = Some(color);
        self
    }

    /// Add a field to the embed.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.inner.fields.push(EmbedField {
            inline,
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Set the footer text.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.inner.footer = Some(EmbedFooter {
            icon_url: None,
            text: text.into(),
        });
        self
    }

    /// Set the thumbnail URL.
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.inner.thumbnail = Some(EmbedMedia { url: url.into() });
        self
    }

    /// Set the image URL.
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.inner.image = Some(EmbedMedia { url: url.into() });
        self
    }

    /// Set the embed author name.
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.inner.author = Some(EmbedAuthor {
            icon_url: None,
            name: name.into(),
            url: None,
        });
        self
    }

    /// Set the embed timestamp from an RFC 3339 string.
    ///
    /// Strings that fail to parse are skipped silently.
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
            self.inner.timestamp = Some(parsed.with_timezone(&Utc));
        }
        self
    }

    /// Set the embed URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    /// Consume the builder and return the finished [`Embed`].
    pub fn build(self) -> Embed {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_builder_basic() {
        let embed = EmbedBuilder::new()
            .title("Test Title")
            .description("Test Description")
            .color(0xFF0000)
            .footer("Footer text")
            .build();

        assert_eq!(embed.title.as_deref(), Some("Test Title"));
        assert_eq!(embed.description.as_deref(), Some("Test Description"));
        assert_eq!(embed.color, Some(0xFF0000));
        assert_eq!(embed.footer.map(|footer| footer.text).as_deref(), Some("Footer text"));
    }

    #[test]
    fn embed_builder_with_fields() {
        let embed = EmbedBuilder::new()
            .field("Name1", "Value1", true)
            .field("Name2", "Value2", false)
            .build();

        assert_eq!(embed.fields.len(), 2);
        assert!(embed.fields[0].inline);
        assert!(!embed.fields[1].inline);
    }

    #[test]
    fn invalid_timestamp_is_skipped() {
        let embed = EmbedBuilder::new().timestamp("yesterday").build();
        assert!(embed.timestamp.is_none());
        assert!(embed.is_empty());

        let embed = EmbedBuilder::new().timestamp("2021-01-01T01:01:01+00:00").build();
        assert!(embed.timestamp.is_some());
    }

    #[test]
    fn empty_parts_are_not_serialized() {
        let embed = EmbedBuilder::new().title("a").build();
        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "a" }));
    }
}
