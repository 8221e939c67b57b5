//! Inbound Webhooks
//!
//! Signature verification, event parsing and concurrent dispatch of platform
//! events to registered listeners.

pub mod dispatch;
pub mod handlers;
pub mod listener;
pub mod parse;
pub mod types;

pub use dispatch::Dispatcher;
pub use listener::{Listener, ListenerError, ListenerResult};
pub use parse::{parse_events, parse_webhook};
pub use types::{DispatchError, WebhookError};
