//! HMAC-SHA256 Webhook Signatures
//!
//! Signs and verifies raw webhook bodies. Verification must run on the exact
//! bytes received, before any JSON parsing.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Name of the request header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Channel secret used as the HMAC key.
///
/// Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChannelSecret(Vec<u8>);

impl ChannelSecret {
    /// Wrap raw secret bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.0).expect("HMAC can take key of any size")
    }
}

impl fmt::Debug for ChannelSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChannelSecret(<redacted>)")
    }
}

impl From<&str> for ChannelSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<String> for ChannelSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

/// Sign a body and return the base64-encoded signature header value.
pub fn sign(secret: &ChannelSecret, body: &[u8]) -> String {
    let mut mac = secret.mac();
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Verify a base64 signature header against the raw request body.
pub fn verify_signature(secret: &ChannelSecret, signature: &str, body: &[u8]) -> Result<()> {
    let decoded = STANDARD
        .decode(signature)
        .map_err(|_| CryptoError::InvalidSignature)?;

    let mut mac = secret.mac();
    mac.update(body);
    // Constant-time comparison
    mac.verify_slice(&decoded)
        .map_err(|_| CryptoError::InvalidSignature)
}
