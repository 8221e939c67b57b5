//! Codec Errors

use thiserror::Error;

/// Errors produced while encoding, decoding or validating wire payloads.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The `type` discriminator is missing, not a string, or not a known kind.
    #[error("unknown kind: {}", .0.as_deref().unwrap_or("<missing type>"))]
    UnknownKind(Option<String>),

    /// The payload does not match the shape selected by its discriminator.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// A well-formed value breaks a platform limit (action counts, column counts, ...).
    #[error("constraint violated: {0}")]
    Constraint(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, CodecError>;
