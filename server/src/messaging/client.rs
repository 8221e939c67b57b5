//! Messaging API Calls

use bytes::Bytes;
use line_common::{
    CodecError, MessagesResponse, PushMessageRequest, UserProfile, ValidateMessageRequest,
    ValidatePushResponse,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::ApiError;
use super::transport::{RawResponse, Transport};

/// Client for the Messaging API endpoints used by the bot.
#[derive(Debug, Clone)]
pub struct MessagingClient<T> {
    transport: T,
}

impl<T: Transport> MessagingClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send messages to a user, group or room.
    ///
    /// POST bot/message/push
    #[instrument(skip_all, fields(to = %request.to, count = request.messages.len()))]
    pub async fn push(&self, request: &PushMessageRequest) -> Result<MessagesResponse, ApiError> {
        request.validate()?;
        let body = self
            .call(Method::POST, &["bot", "message", "push"], Some(encode(request)?))
            .await?;
        decode_or_default(&body)
    }

    /// Ask the platform to validate messages without sending them.
    ///
    /// POST bot/message/validate/push
    pub async fn validate_push(
        &self,
        request: &ValidateMessageRequest,
    ) -> Result<ValidatePushResponse, ApiError> {
        request.validate()?;
        let body = self
            .call(
                Method::POST,
                &["bot", "message", "validate", "push"],
                Some(encode(request)?),
            )
            .await?;
        decode_or_default(&body)
    }

    /// Fetch a user's profile.
    ///
    /// GET bot/profile/{userId}
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        check_segment(user_id)?;
        let body = self
            .call(Method::GET, &["bot", "profile", user_id], None)
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn call(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ApiError> {
        let response = self.transport.send(method, path, body).await?;
        debug!(status = response.status, "Messaging API responded");
        check_response(response)
    }
}

/// Empty, `.` and `..` segments would be dropped or resolved by URL path
/// normalization and hit a different endpoint.
fn check_segment(segment: &str) -> Result<(), ApiError> {
    if matches!(segment, "" | "." | "..") {
        return Err(ApiError::InvalidPathSegment(segment.to_string()));
    }
    Ok(())
}

fn encode<R: Serialize>(request: &R) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(request).map_err(|e| CodecError::MalformedPayload(e).into())
}

/// Empty bodies decode to the default response.
fn decode_or_default<R: DeserializeOwned + Default>(body: &[u8]) -> Result<R, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(R::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Map a raw response to its body or an [`ApiError`].
pub fn check_response(response: RawResponse) -> Result<Bytes, ApiError> {
    match response.status {
        200 | 201 | 202 | 204 | 304 => Ok(response.body),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Status {
            status,
            message: error_message(&response.body),
        }),
    }
}

fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        return String::new();
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => flatten_error(&value),
        Err(_) => format!("failed to parse unknown error format: {text}"),
    }
}

/// Render an arbitrary JSON error body as one line.
///
/// Arrays become `[a, b]`; objects become `{key: value}` pairs sorted and
/// joined by `, `.
fn flatten_error(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(flatten_error).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(fields) => {
            let mut parts: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{{{key}: {}}}", flatten_error(value)))
                .collect();
            parts.sort();
            parts.join(", ")
        }
        other => other.to_string(),
    }
}
