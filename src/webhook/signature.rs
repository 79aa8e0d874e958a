//! `X-Line-Signature` verification: base64(HMAC-SHA256(channel secret, raw body)).

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const LINE_SIGNATURE_HEADER: &str = "x-line-signature";

/// Compute the signature the platform would send for `body`.
pub fn sign_body(channel_secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a received signature.
pub fn validate_signature(channel_secret: &str, signature: &str, body: &[u8]) -> bool {
    let Some(expected) = sign_body(channel_secret, body) else {
        return false;
    };
    expected.as_bytes().ct_eq(signature.trim().as_bytes()).into()
}
