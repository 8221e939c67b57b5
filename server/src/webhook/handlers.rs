//! Webhook HTTP Handler

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use line_crypto::SIGNATURE_HEADER;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::types::WebhookError;
use crate::api::AppState;

/// Receive a webhook delivery.
///
/// POST /webhook
///
/// A missing signature header fails verification like a wrong one.
/// Listeners are cancelled if the request is dropped mid-dispatch.
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    state
        .dispatcher
        .dispatch_body(&cancel, signature, &body)
        .await
        .inspect_err(|e| {
            if matches!(e, WebhookError::InvalidSignature) {
                tracing::warn!("Rejected webhook with invalid signature");
            }
        })?;

    Ok(StatusCode::OK)
}
