//! Webhook signature verification.
//!
//! Authenticity of inbound webhook calls is an HMAC-SHA256 over the exact
//! raw request bytes, hex-encoded into the signature header by the sender.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verify a webhook signature against the shared secret.
///
/// The signature must be computed over the raw body bytes before any
/// parsing, so re-serialization on the sender side cannot break it. Returns
/// `false` (never panics) for an absent header, a non-hex header, or any
/// computation failure. The digest comparison is constant-time.
pub fn verify_signature(payload: &[u8], signature: Option<&str>, secret: &str) -> bool {
    let Some(signature) = signature else {
        return false;
    };

    let Ok(supplied) = hex::decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);

    mac.verify_slice(&supplied).is_ok()
}
