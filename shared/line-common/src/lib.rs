//! LINE Common Library
//!
//! Wire types shared by the outbound messaging client and the inbound webhook
//! pipeline, plus the codec that maps them onto discriminated JSON.

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{
    decode_message, decode_push_request, decode_template, encode_message, encode_template,
};
pub use error::{CodecError, Result};
pub use types::*;
