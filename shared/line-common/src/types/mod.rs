//! Shared Types

pub mod action;
pub mod envelope;
pub mod event;
pub mod message;
pub mod template;
pub mod user;

pub use action::*;
pub use envelope::*;
pub use event::*;
pub use message::*;
pub use template::*;
pub use user::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Serializes a variant body with its `type` discriminator in front.
#[derive(Serialize)]
pub(crate) struct Tagged<'a, T> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub body: &'a T,
}

/// `skip_serializing_if` predicate: optional strings are omitted when absent or empty.
#[allow(clippy::ref_option)]
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Reads `""` and `null` as `None`, mirroring `is_blank` on the way out.
pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
