//! Messaging API Errors

use line_common::CodecError;
use thiserror::Error;

/// Errors from calling the Messaging API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A caller-supplied ID cannot be used as a URL path segment.
    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),
    #[error("404 Not Found")]
    NotFound,
    /// Any other non-success status, with the error body flattened to text.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The outgoing payload failed validation or encoding.
    #[error("Invalid request payload: {0}")]
    Codec(#[from] CodecError),
    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
