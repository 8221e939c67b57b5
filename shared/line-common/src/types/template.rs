//! Template Payloads
//!
//! The nested tagged union carried by a template message.
//! <https://developers.line.biz/en/reference/messaging-api/#template-messages>

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{is_blank, non_empty, Action, Tagged};
use crate::{codec, CodecError, Result};

/// Maximum number of actions on a buttons template.
pub const MAX_BUTTONS_ACTIONS: usize = 4;

/// Maximum number of actions on a carousel column.
pub const MAX_COLUMN_ACTIONS: usize = 3;

/// Maximum number of columns on a carousel or image carousel.
pub const MAX_COLUMNS: usize = 10;

/// Template kind, as carried in the nested `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Buttons,
    Confirm,
    Carousel,
    ImageCarousel,
}

impl TemplateKind {
    /// Parse from the wire string (e.g., `"image_carousel"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "buttons" => Some(Self::Buttons),
            "confirm" => Some(Self::Confirm),
            "carousel" => Some(Self::Carousel),
            "image_carousel" => Some(Self::ImageCarousel),
            _ => None,
        }
    }

    /// Convert to the wire string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buttons => "buttons",
            Self::Confirm => "confirm",
            Self::Carousel => "carousel",
            Self::ImageCarousel => "image_carousel",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aspect ratio of template images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAspectRatio {
    /// 1.51:1
    Rectangle,
    /// 1:1
    Square,
}

/// How template images fill their area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// Fill the whole area, cropping as needed.
    Cover,
    /// Show the whole image, letterboxing as needed.
    Contain,
}

/// Template payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Buttons(ButtonsTemplate),
    Confirm(ConfirmTemplate),
    Carousel(CarouselTemplate),
    ImageCarousel(ImageCarouselTemplate),
    /// A template kind this library does not know yet, kept as received.
    Other(serde_json::Value),
}

impl Template {
    /// The template kind, or `None` for [`Template::Other`].
    pub const fn kind(&self) -> Option<TemplateKind> {
        match self {
            Self::Buttons(_) => Some(TemplateKind::Buttons),
            Self::Confirm(_) => Some(TemplateKind::Confirm),
            Self::Carousel(_) => Some(TemplateKind::Carousel),
            Self::ImageCarousel(_) => Some(TemplateKind::ImageCarousel),
            Self::Other(_) => None,
        }
    }

    /// Check platform limits on action and column counts.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Buttons(t) => check_count("buttons actions", t.actions.len(), MAX_BUTTONS_ACTIONS),
            // Exactly two actions is enforced by the type.
            Self::Confirm(_) | Self::Other(_) => Ok(()),
            Self::Carousel(t) => {
                check_count("carousel columns", t.columns.len(), MAX_COLUMNS)?;
                let expected = t.columns[0].actions.len();
                for (i, column) in t.columns.iter().enumerate() {
                    check_count("carousel column actions", column.actions.len(), MAX_COLUMN_ACTIONS)?;
                    if column.actions.len() != expected {
                        return Err(CodecError::Constraint(format!(
                            "carousel column {i} has {} actions, expected {expected} like column 0",
                            column.actions.len()
                        )));
                    }
                }
                Ok(())
            }
            Self::ImageCarousel(t) => {
                check_count("image carousel columns", t.columns.len(), MAX_COLUMNS)
            }
        }
    }
}

fn check_count(what: &str, len: usize, max: usize) -> Result<()> {
    if (1..=max).contains(&len) {
        Ok(())
    } else {
        Err(CodecError::Constraint(format!(
            "{what}: expected 1 to {max}, got {len}"
        )))
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Buttons(body) => tagged(TemplateKind::Buttons, body).serialize(serializer),
            Self::Confirm(body) => tagged(TemplateKind::Confirm, body).serialize(serializer),
            Self::Carousel(body) => tagged(TemplateKind::Carousel, body).serialize(serializer),
            Self::ImageCarousel(body) => {
                tagged(TemplateKind::ImageCarousel, body).serialize(serializer)
            }
            Self::Other(raw) => raw.serialize(serializer),
        }
    }
}

const fn tagged<T>(kind: TemplateKind, body: &T) -> Tagged<'_, T> {
    Tagged {
        kind: kind.as_str(),
        body,
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        codec::template_from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Buttons template: optional image and title, text, and up to four actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonsTemplate {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub thumbnail_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<ImageAspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    /// Hex color such as `#FFFFFF`.
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub image_background_color: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    pub text: String,
    /// Action taken when the image, title or text area is tapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<Action>,
    pub actions: Vec<Action>,
}

impl ButtonsTemplate {
    /// Buttons template with only text and actions.
    pub fn new(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            thumbnail_image_url: None,
            image_aspect_ratio: None,
            image_size: None,
            image_background_color: None,
            title: None,
            text: text.into(),
            default_action: None,
            actions,
        }
    }
}

/// Confirm template: text and exactly two actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmTemplate {
    pub text: String,
    pub actions: [Action; 2],
}

/// Carousel template. Image sizing is shared by every column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselTemplate {
    pub columns: Vec<CarouselColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<ImageAspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

/// One carousel column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselColumn {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub thumbnail_image_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub image_background_color: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<Action>,
    pub actions: Vec<Action>,
}

/// Image carousel template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCarouselTemplate {
    pub columns: Vec<ImageCarouselColumn>,
}

/// One image carousel column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCarouselColumn {
    pub image_url: String,
    pub action: Action,
}
