//! Webhook Event Parsing
//!
//! Turns a verified request body into typed events. Unknown event kinds are
//! skipped so new platform events do not break existing bots.

use line_common::{EventKind, WebhookEvent};
use line_crypto::{verify_signature, ChannelSecret};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::types::WebhookError;

/// Parse a webhook body whose signature has already been checked.
///
/// Events keep their original order.
pub fn parse_events(body: &[u8]) -> Result<Vec<WebhookEvent>, WebhookError> {
    let payload: Value = serde_json::from_slice(body)?;

    if let Some(destination) = payload.get("destination").and_then(Value::as_str) {
        debug!(destination, "Webhook destination");
    }

    let raw_events = match payload.get("events") {
        None | Some(Value::Null) => return Err(WebhookError::NoEvents),
        Some(Value::Array(events)) if events.is_empty() => return Err(WebhookError::NoEvents),
        Some(Value::Array(events)) => events,
        Some(_) => {
            return Err(WebhookError::InvalidEvent(
                "`events` must be an array".to_string(),
            ))
        }
    };

    let mut events = Vec::with_capacity(raw_events.len());
    for (index, raw) in raw_events.iter().enumerate() {
        let Some(event_type) = raw.get("type").and_then(Value::as_str) else {
            return Err(WebhookError::InvalidEvent(format!(
                "event {index} is not an object with a string `type`"
            )));
        };

        if EventKind::parse_str(event_type).is_none() {
            warn!(event_type, index, "Skipping unsupported webhook event");
            continue;
        }

        events.push(WebhookEvent::deserialize(raw)?);
    }

    Ok(events)
}

/// Verify the body against its `x-line-signature` value, then parse it.
pub fn parse_webhook(
    secret: &ChannelSecret,
    signature: &str,
    body: &[u8],
) -> Result<Vec<WebhookEvent>, WebhookError> {
    verify_signature(secret, signature, body)?;
    parse_events(body)
}

#[cfg(test)]
mod tests {
    use line_common::Source;
    use line_crypto::sign;
    use serde_json::json;

    use super::*;

    fn follow(id: &str) -> Value {
        json!({
            "type": "follow",
            "replyToken": "reply-token",
            "mode": "active",
            "timestamp": 1_625_665_242_211_i64,
            "source": {"type": "user", "userId": "U80696558e1aa831"},
            "webhookEventId": id,
            "deliveryContext": {"isRedelivery": false},
            "follow": {"isUnblocked": false}
        })
    }

    fn body(events: &[Value]) -> Vec<u8> {
        serde_json::to_vec(&json!({"destination": "Uxxxxxxxx", "events": events})).unwrap()
    }

    #[test]
    fn skips_unknown_kinds() {
        let unknown = json!({"type": "beacon", "timestamp": 1, "beacon": {"hwid": "d41d8cd98f"}});
        let events = parse_events(&body(&[follow("01A"), unknown])).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Follow);
        assert_eq!(events[0].webhook_event_id(), "01A");
    }

    #[test]
    fn only_unknown_kinds_is_empty_not_error() {
        let events = parse_events(&body(&[json!({"type": "message"})])).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn preserves_order() {
        let unfollow = json!({
            "type": "unfollow",
            "mode": "active",
            "timestamp": 1_625_665_242_212_i64,
            "source": {"type": "group", "groupId": "C1", "userId": "U1"},
            "webhookEventId": "01B",
            "deliveryContext": {"isRedelivery": true}
        });
        let events = parse_events(&body(&[unfollow, follow("01C")])).unwrap();

        assert_eq!(events[0].kind(), EventKind::Unfollow);
        assert_eq!(
            events[0].source(),
            &Source::Group {
                group_id: "C1".into(),
                user_id: Some("U1".into())
            }
        );
        assert_eq!(events[1].kind(), EventKind::Follow);
    }

    #[test]
    fn empty_or_missing_events() {
        assert!(matches!(parse_events(&body(&[])), Err(WebhookError::NoEvents)));
        assert!(matches!(
            parse_events(br#"{"destination":"U1"}"#),
            Err(WebhookError::NoEvents)
        ));
        assert!(matches!(
            parse_events(br#"{"events":"follow"}"#),
            Err(WebhookError::InvalidEvent(_))
        ));
    }

    #[test]
    fn event_without_type_is_invalid() {
        let err = parse_events(&body(&[json!({"timestamp": 1})])).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidEvent(msg) if msg.contains("event 0")));

        let err = parse_events(&body(&[json!(42)])).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidEvent(_)));
    }

    #[test]
    fn known_kind_with_wrong_shape_is_malformed() {
        let broken = json!({"type": "follow", "timestamp": "yesterday"});
        assert!(matches!(
            parse_events(&body(&[broken])),
            Err(WebhookError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_events(b"not json"),
            Err(WebhookError::MalformedPayload(_))
        ));
    }

    #[test]
    fn verifies_before_parsing() {
        let secret = ChannelSecret::from("channel-secret");
        let payload = body(&[follow("01D")]);
        let signature = sign(&secret, &payload);

        let events = parse_webhook(&secret, &signature, &payload).unwrap();
        assert_eq!(events.len(), 1);

        let other = ChannelSecret::from("other-secret");
        assert!(matches!(
            parse_webhook(&other, &signature, &payload),
            Err(WebhookError::InvalidSignature)
        ));

        // Garbage is rejected on the signature, not the JSON.
        assert!(matches!(
            parse_webhook(&secret, &signature, b"not json"),
            Err(WebhookError::InvalidSignature)
        ));
    }
}
