//! LINE Webhook Cryptography
//!
//! HMAC-SHA256 signatures carried in the `x-line-signature` header.
//!
//! - **Signing**: base64 HMAC-SHA256 of the raw request body, keyed by the channel secret
//! - **Verification**: constant-time comparison against the computed digest

pub mod error;
pub mod signature;

pub use error::{CryptoError, Result};
pub use signature::{sign, verify_signature, ChannelSecret, SIGNATURE_HEADER};
