//! Webhook Errors

use axum::http::StatusCode;
use line_common::EventKind;
use line_crypto::CryptoError;
use thiserror::Error;

use super::listener::ListenerError;

/// Errors from verifying, parsing or dispatching a webhook request.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Webhook payload carries no events")]
    NoEvents,
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl From<CryptoError> for WebhookError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidSignature => Self::InvalidSignature,
        }
    }
}

/// Errors from running the listeners of an event.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("No route for event kind {0}")]
    UnsupportedEvent(EventKind),
    /// The first error returned by a listener, unchanged.
    #[error("{0}")]
    Listener(ListenerError),
    /// A listener task panicked or was aborted.
    #[error("Listener panicked: {0}")]
    ListenerPanicked(String),
}

impl From<WebhookError> for (StatusCode, String) {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::InvalidSignature => (StatusCode::UNAUTHORIZED, err.to_string()),
            WebhookError::NoEvents
            | WebhookError::InvalidEvent(_)
            | WebhookError::MalformedPayload(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            WebhookError::Dispatch(e) => {
                tracing::error!(error = %e, "Webhook dispatch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}
