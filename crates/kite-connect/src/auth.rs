//! SHA-256 checksums for token exchange.

use sha2::{Digest, Sha256};

/// Checksum proving possession of the API secret.
///
/// Hex-encoded SHA-256 of `api_key + token + api_secret`, where `token` is a
/// request token or a refresh token.
pub fn checksum(api_key: &str, token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
