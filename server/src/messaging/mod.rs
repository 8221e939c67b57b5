//! Messaging API Client
//!
//! Outbound calls to the LINE Messaging API: push messages, validate message
//! payloads and look up user profiles.

pub mod client;
pub mod error;
pub mod transport;

pub use client::MessagingClient;
pub use error::ApiError;
pub use transport::{HttpTransport, RawResponse, Transport};
