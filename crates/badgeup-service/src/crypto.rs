//! Slack request signature verification.
//!
//! Slack signs every slash-command and options request with
//! `v0=hex(HMAC-SHA256(signing_secret, "v0:{timestamp}:{body}"))` and sends the
//! result in `X-Slack-Signature` alongside `X-Slack-Request-Timestamp`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signature scheme version prefix.
pub const SIGNATURE_VERSION: &str = "v0";

/// Requests older (or newer) than this many seconds are rejected.
pub const MAX_REQUEST_AGE_SECONDS: i64 = 5 * 60;

/// Reasons a signed request can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// The timestamp header is not an integer.
    #[error("malformed request timestamp")]
    MalformedTimestamp,

    /// The timestamp is outside the accepted window.
    #[error("request timestamp is stale")]
    StaleTimestamp,

    /// The computed signature does not match.
    #[error("signature mismatch")]
    Mismatch,
}

/// Compute HMAC-SHA256 and return hex-encoded result.
///
/// # Panics
///
/// This function will never panic in practice. HMAC-SHA256 accepts keys of
/// any size per RFC 2104.
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    // INVARIANT: new_from_slice only fails for fixed-size-key MACs.
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compute the `X-Slack-Signature` value for a request.
#[must_use]
pub fn slack_signature(secret: &str, timestamp: &str, body: &str) -> String {
    let base = format!("{SIGNATURE_VERSION}:{timestamp}:{body}");
    format!("{SIGNATURE_VERSION}={}", hmac_sha256_hex(secret, &base))
}

/// Verify a Slack request signature against the current time `now`
/// (Unix seconds).
///
/// # Errors
///
/// Returns a `SignatureError` describing why the request is not authentic.
pub fn verify_slack_signature(
    secret: &str,
    timestamp: &str,
    body: &str,
    signature: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let sent_at: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| SignatureError::MalformedTimestamp)?;
    if now.abs_diff(sent_at) > MAX_REQUEST_AGE_SECONDS.unsigned_abs() {
        return Err(SignatureError::StaleTimestamp);
    }

    let expected = slack_signature(secret, timestamp.trim(), body);
    if constant_time_eq(&expected, signature.trim()) {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

/// Constant-time string comparison to prevent timing attacks.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
