//! Tagged-Payload Codec
//!
//! Wire payloads are flat JSON objects whose shape depends on the value of
//! their `type` field, so decoding happens in two passes: parse into a
//! generic value, read the discriminator, then decode strictly into the
//! selected variant.
//!
//! Unknown message kinds are fatal. Unknown template kinds are kept as
//! [`Template::Other`] so that newer platform templates pass through.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::types::{Message, MessageKind, PushMessageRequest, Template, TemplateKind};
use crate::{CodecError, Result};

/// Encode a message to JSON bytes.
pub fn encode_message(message: &Message) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(message)?)
}

/// Decode a message from JSON bytes.
pub fn decode_message(bytes: &[u8]) -> Result<Message> {
    let value: Value = serde_json::from_slice(bytes)?;
    message_from_value(value)
}

/// Encode a template to JSON bytes.
pub fn encode_template(template: &Template) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(template)?)
}

/// Decode a template from JSON bytes.
///
/// Unlike [`decode_message`], an unknown `type` is not an error.
pub fn decode_template(bytes: &[u8]) -> Result<Template> {
    let value: Value = serde_json::from_slice(bytes)?;
    template_from_value(value).map_err(CodecError::MalformedPayload)
}

/// Decode a push envelope, `{"to": ..., "messages": [...]}`.
///
/// Messages are decoded one by one so that an unknown kind surfaces as
/// [`CodecError::UnknownKind`] rather than a generic parse error.
pub fn decode_push_request(bytes: &[u8]) -> Result<PushMessageRequest> {
    let mut value: Value = serde_json::from_slice(bytes)?;
    let to: String = strict(value.get_mut("to").map(Value::take).unwrap_or_default())?;
    let raw: Vec<Value> = strict(
        value
            .get_mut("messages")
            .map(Value::take)
            .unwrap_or_else(|| Value::Array(Vec::new())),
    )?;

    let messages = raw
        .into_iter()
        .map(message_from_value)
        .collect::<Result<Vec<_>>>()?;

    Ok(PushMessageRequest { to, messages })
}

/// Second pass of message decoding, on an already parsed value.
pub(crate) fn message_from_value(value: Value) -> Result<Message> {
    let kind = {
        let raw = discriminator(&value).ok_or(CodecError::UnknownKind(None))?;
        MessageKind::parse_str(raw).ok_or_else(|| CodecError::UnknownKind(Some(raw.to_owned())))?
    };

    let message = match kind {
        // A text payload carrying emojis is an emoji message; the discriminator alone
        // cannot tell them apart.
        MessageKind::Text if has_emojis(&value) => Message::Emoji(strict(value)?),
        MessageKind::Text => Message::Text(strict(value)?),
        MessageKind::Sticker => Message::Sticker(strict(value)?),
        MessageKind::Image => Message::Image(strict(value)?),
        MessageKind::Video => Message::Video(strict(value)?),
        MessageKind::Audio => Message::Audio(strict(value)?),
        MessageKind::Location => Message::Location(strict(value)?),
        MessageKind::Template => Message::Template(strict(value)?),
    };
    Ok(message)
}

/// Second pass of template decoding. Unknown kinds fall back to [`Template::Other`].
pub(crate) fn template_from_value(value: Value) -> serde_json::Result<Template> {
    let kind = match discriminator(&value) {
        Some(raw) => match TemplateKind::parse_str(raw) {
            Some(kind) => kind,
            None => {
                debug!(template_type = raw, "Unknown template type, keeping raw payload");
                return Ok(Template::Other(value));
            }
        },
        None => {
            debug!("Template without a string type, keeping raw payload");
            return Ok(Template::Other(value));
        }
    };

    let template = match kind {
        TemplateKind::Buttons => Template::Buttons(serde_json::from_value(value)?),
        TemplateKind::Confirm => Template::Confirm(serde_json::from_value(value)?),
        TemplateKind::Carousel => Template::Carousel(serde_json::from_value(value)?),
        TemplateKind::ImageCarousel => Template::ImageCarousel(serde_json::from_value(value)?),
    };
    Ok(template)
}

fn discriminator(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

fn has_emojis(value: &Value) -> bool {
    value.get("emojis").is_some_and(|emojis| !emojis.is_null())
}

fn strict<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(CodecError::MalformedPayload)
}
