//! Message Payloads
//!
//! Outbound message objects. Each variant serializes as a flat JSON object
//! whose `type` field selects the shape of the remaining fields.
//! <https://developers.line.biz/en/reference/messaging-api/#message-objects>

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{is_blank, non_empty, Tagged, Template};
use crate::{codec, CodecError, Result};

/// Message kind, as carried in the `type` field.
///
/// Text and emoji messages share [`MessageKind::Text`]; the presence of an
/// `emojis` array tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Sticker,
    Image,
    Video,
    Audio,
    Location,
    Template,
}

impl MessageKind {
    /// Parse from the wire string (e.g., `"sticker"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "sticker" => Some(Self::Sticker),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "location" => Some(Self::Location),
            "template" => Some(Self::Template),
            _ => None,
        }
    }

    /// Convert to the wire string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Sticker => "sticker",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Location => "location",
            Self::Template => "template",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(TextMessage),
    Emoji(EmojiMessage),
    Sticker(StickerMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    Location(LocationMessage),
    Template(TemplateMessage),
}

impl Message {
    /// Plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextMessage {
            text: text.into(),
            quote_token: None,
        })
    }

    /// Sticker message.
    pub fn sticker(package_id: impl Into<String>, sticker_id: impl Into<String>) -> Self {
        Self::Sticker(StickerMessage {
            package_id: package_id.into(),
            sticker_id: sticker_id.into(),
            quote_token: None,
        })
    }

    /// Template message.
    pub fn template(alt_text: impl Into<String>, template: Template) -> Self {
        Self::Template(TemplateMessage {
            alt_text: alt_text.into(),
            template,
        })
    }

    /// The wire discriminator of this message.
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Text(_) | Self::Emoji(_) => MessageKind::Text,
            Self::Sticker(_) => MessageKind::Sticker,
            Self::Image(_) => MessageKind::Image,
            Self::Video(_) => MessageKind::Video,
            Self::Audio(_) => MessageKind::Audio,
            Self::Location(_) => MessageKind::Location,
            Self::Template(_) => MessageKind::Template,
        }
    }

    /// Check platform limits before sending.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Emoji(m) if m.emojis.is_empty() => Err(CodecError::Constraint(
                "emoji message must carry at least one emoji".into(),
            )),
            Self::Template(m) => {
                if m.alt_text.is_empty() {
                    return Err(CodecError::Constraint(
                        "template message alt text must not be empty".into(),
                    ));
                }
                m.template.validate()
            }
            _ => Ok(()),
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let kind = self.kind().as_str();
        match self {
            Self::Text(body) => Tagged { kind, body }.serialize(serializer),
            Self::Emoji(body) => Tagged { kind, body }.serialize(serializer),
            Self::Sticker(body) => Tagged { kind, body }.serialize(serializer),
            Self::Image(body) => Tagged { kind, body }.serialize(serializer),
            Self::Video(body) => Tagged { kind, body }.serialize(serializer),
            Self::Audio(body) => Tagged { kind, body }.serialize(serializer),
            Self::Location(body) => Tagged { kind, body }.serialize(serializer),
            Self::Template(body) => Tagged { kind, body }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        codec::message_from_value(value).map_err(serde::de::Error::custom)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(body: $ty) -> Self {
                    Self::$variant(body)
                }
            }
        )*
    };
}

impl_from_variant!(
    Text(TextMessage),
    Emoji(EmojiMessage),
    Sticker(StickerMessage),
    Image(ImageMessage),
    Video(VideoMessage),
    Audio(AudioMessage),
    Location(LocationMessage),
    Template(TemplateMessage),
);

/// Text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub text: String,
    /// Quote token of the message being replied to.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub quote_token: Option<String>,
}

/// Text message with LINE emoji substituted at `$` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiMessage {
    pub text: String,
    pub emojis: Vec<Emoji>,
}

/// One LINE emoji placement inside an [`EmojiMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    /// Character offset of the `$` placeholder in the text.
    pub index: u32,
    pub product_id: String,
    pub emoji_id: String,
}

/// Sticker message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerMessage {
    pub package_id: String,
    pub sticker_id: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub quote_token: Option<String>,
}

/// Image message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMessage {
    pub original_content_url: String,
    pub preview_image_url: String,
}

/// Video message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMessage {
    pub original_content_url: String,
    pub preview_image_url: String,
    /// Identifier reported back in video viewing complete events.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub tracking_id: Option<String>,
}

/// Audio message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    pub original_content_url: String,
    /// Length of the audio in milliseconds.
    pub duration: u64,
}

/// Location message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMessage {
    pub title: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Template message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMessage {
    /// Shown on clients that cannot render templates.
    pub alt_text: String,
    pub template: Template,
}
