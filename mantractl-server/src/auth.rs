//! Bearer-token signing and verification.
//!
//! Tokens are HMAC-SHA256 signed strings minted out-of-band (see the
//! `mantractl token` command); the HTTP surface only ever verifies them.
//! Format: `{user_id}:{expires_rfc3339}:{signature_hex}`, where the
//! signature covers `{user_id}:{expires_rfc3339}`.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Token verification error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    BadSignature,

    #[error("token expired at {0}")]
    Expired(DateTime<Utc>),
}

/// Sign a token for `user_id`, valid until `expires_at`.
pub fn sign_token(user_id: Uuid, expires_at: DateTime<Utc>, secret: &[u8]) -> String {
    let payload = format!("{}:{}", user_id, expires_at.to_rfc3339());
    let signature = mac(secret)
        .chain_update(payload.as_bytes())
        .finalize()
        .into_bytes();
    format!("{}:{}", payload, hex::encode(signature))
}

/// Verify `raw` against `secret` and return the authenticated user id.
///
/// The signature is checked before the expiry is parsed, so a tampered
/// expiry never gets interpreted.
pub fn verify_token(raw: &str, secret: &[u8], now: DateTime<Utc>) -> Result<Uuid, AuthError> {
    // The RFC 3339 expiry contains ':' itself, so split the signature off
    // the end rather than scanning from the front.
    let (payload, signature_hex) = raw.rsplit_once(':').ok_or(AuthError::Malformed)?;
    let signature = hex::decode(signature_hex).map_err(|_| AuthError::Malformed)?;

    mac(secret)
        .chain_update(payload.as_bytes())
        .verify_slice(&signature)
        .map_err(|_| AuthError::BadSignature)?;

    let (user_id, expires) = payload.split_once(':').ok_or(AuthError::Malformed)?;
    let user_id = Uuid::parse_str(user_id).map_err(|_| AuthError::Malformed)?;
    let expires_at = DateTime::parse_from_rfc3339(expires)
        .map_err(|_| AuthError::Malformed)?
        .with_timezone(&Utc);

    if expires_at <= now {
        return Err(AuthError::Expired(expires_at));
    }

    Ok(user_id)
}

fn mac(secret: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length.
    HmacSha256::new_from_slice(secret).expect("HMAC key length is unrestricted")
}
