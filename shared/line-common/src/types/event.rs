//! Webhook Events
//!
//! Events delivered to the bot's webhook URL.
//! <https://developers.line.biz/en/reference/messaging-api/#webhook-event-objects>

use serde::{Deserialize, Serialize};

/// Webhook event kind, as carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Follow,
    Unfollow,
}

impl EventKind {
    /// Every kind the webhook parser understands.
    pub const ALL: [Self; 2] = [Self::Follow, Self::Unfollow];

    /// Parse from the wire string (e.g., `"follow"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "follow" => Some(Self::Follow),
            "unfollow" => Some(Self::Unfollow),
            _ => None,
        }
    }

    /// Convert to the wire string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    /// The bot was added as a friend or unblocked.
    Follow(FollowEvent),
    /// The bot was blocked.
    Unfollow(UnfollowEvent),
}

impl WebhookEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Follow(_) => EventKind::Follow,
            Self::Unfollow(_) => EventKind::Unfollow,
        }
    }

    /// Where the event came from.
    pub const fn source(&self) -> &Source {
        match self {
            Self::Follow(e) => &e.source,
            Self::Unfollow(e) => &e.source,
        }
    }

    /// Milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> i64 {
        match self {
            Self::Follow(e) => e.timestamp,
            Self::Unfollow(e) => e.timestamp,
        }
    }

    /// Platform-assigned event ID, stable across redeliveries.
    pub fn webhook_event_id(&self) -> &str {
        match self {
            Self::Follow(e) => &e.webhook_event_id,
            Self::Unfollow(e) => &e.webhook_event_id,
        }
    }

    pub const fn as_follow(&self) -> Option<&FollowEvent> {
        match self {
            Self::Follow(e) => Some(e),
            Self::Unfollow(_) => None,
        }
    }

    pub const fn as_unfollow(&self) -> Option<&UnfollowEvent> {
        match self {
            Self::Unfollow(e) => Some(e),
            Self::Follow(_) => None,
        }
    }
}

/// Channel mode at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    #[default]
    Active,
    /// Another module owns the chat; the bot should not reply.
    Standby,
}

/// Delivery metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    /// Whether this is a redelivery of an earlier, unacknowledged event.
    pub is_redelivery: bool,
}

/// Originating chat of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    #[serde(rename_all = "camelCase")]
    User { user_id: String },
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Room {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
}

impl Source {
    /// The acting user, when known.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::User { user_id } => Some(user_id),
            Self::Group { user_id, .. } | Self::Room { user_id, .. } => user_id.as_deref(),
        }
    }

    /// ID to push replies to: the user, group or room.
    pub fn chat_id(&self) -> &str {
        match self {
            Self::User { user_id } => user_id,
            Self::Group { group_id, .. } => group_id,
            Self::Room { room_id, .. } => room_id,
        }
    }
}

/// Follow event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEvent {
    pub reply_token: String,
    #[serde(default)]
    pub mode: EventMode,
    pub timestamp: i64,
    pub source: Source,
    pub webhook_event_id: String,
    #[serde(default)]
    pub delivery_context: DeliveryContext,
    #[serde(default)]
    pub follow: Follow,
}

/// Follow details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    /// `true` when the user unblocked the bot rather than adding it.
    pub is_unblocked: bool,
}

/// Unfollow event. Carries no reply token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowEvent {
    #[serde(default)]
    pub mode: EventMode,
    pub timestamp: i64,
    pub source: Source,
    pub webhook_event_id: String,
    #[serde(default)]
    pub delivery_context: DeliveryContext,
}
