//! Template Actions
//!
//! <https://developers.line.biz/en/reference/messaging-api/#action-objects>

use serde::{Deserialize, Serialize};

use super::{is_blank, non_empty};

/// Action attached to a template button, column or image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Sends a postback event carrying `data` back to the bot.
    #[serde(rename_all = "camelCase")]
    Postback {
        #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
        label: Option<String>,
        data: String,
        /// Text shown in the chat as if typed by the user.
        #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
        display_text: Option<String>,
    },
    /// Sends `text` as a message from the user.
    Message {
        #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
        label: Option<String>,
        text: String,
    },
    /// Opens `uri`.
    Uri {
        #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "is_blank")]
        label: Option<String>,
        uri: String,
    },
}

impl Action {
    /// Postback action with a label.
    pub fn postback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Postback {
            label: Some(label.into()),
            data: data.into(),
            display_text: None,
        }
    }

    /// Message action with a label.
    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Message {
            label: Some(label.into()),
            text: text.into(),
        }
    }

    /// URI action with a label.
    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::Uri {
            label: Some(label.into()),
            uri: uri.into(),
        }
    }

    /// The action's label, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Postback { label, .. } | Self::Message { label, .. } | Self::Uri { label, .. } => {
                label.as_deref()
            }
        }
    }
}
