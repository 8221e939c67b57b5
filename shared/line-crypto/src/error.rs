//! Crypto Errors

use thiserror::Error;

/// Errors produced while checking webhook authenticity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature header was not valid base64 or did not match the body.
    #[error("invalid webhook signature")]
    InvalidSignature,
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, CryptoError>;
