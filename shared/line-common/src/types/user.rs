//! User Types

use serde::{Deserialize, Serialize};

/// User profile returned by `GET bot/profile/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    pub display_name: String,
    /// User ID (`U` followed by 32 hex characters).
    pub user_id: String,
    /// Profile image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    /// Status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    /// Language tag, only present when the user has consented to share it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}
