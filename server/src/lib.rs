//! LINE Bot Server
//!
//! Receives signed webhook deliveries from the LINE platform, dispatches the
//! events to registered listeners, and talks back through the Messaging API.

pub mod api;
pub mod config;
pub mod messaging;
pub mod webhook;
