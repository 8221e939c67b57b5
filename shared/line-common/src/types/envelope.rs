//! Request and Response Envelopes
//!
//! Outer objects of the Messaging API calls that carry messages.

use serde::{Deserialize, Serialize};

use super::Message;
use crate::Result;

/// Body of `POST bot/message/push`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessageRequest {
    /// User, group or room ID of the recipient.
    pub to: String,
    pub messages: Vec<Message>,
}

impl PushMessageRequest {
    pub fn new(to: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            to: to.into(),
            messages,
        }
    }

    /// Validate every message against platform limits.
    pub fn validate(&self) -> Result<()> {
        validate_messages(&self.messages)
    }
}

/// Body of `POST bot/message/validate/push`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateMessageRequest {
    pub messages: Vec<Message>,
}

impl ValidateMessageRequest {
    /// Validate every message against platform limits.
    pub fn validate(&self) -> Result<()> {
        validate_messages(&self.messages)
    }
}

fn validate_messages(messages: &[Message]) -> Result<()> {
    messages.iter().try_for_each(Message::validate)
}

/// Response of a successful push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    #[serde(default)]
    pub sent_messages: Vec<SentMessage>,
}

/// A message accepted by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    /// Token for quoting this message later; absent for non-quotable kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

/// Response of `POST bot/message/validate/push`.
///
/// An empty body means the messages are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatePushResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

/// One problem reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    /// Path of the offending property, e.g. `messages[0].text`.
    #[serde(default)]
    pub property: String,
}
