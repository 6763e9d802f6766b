//! Cloudinary API request signing.
//!
//! Parameters are sorted by name, joined as `name=value` pairs with `&`,
//! suffixed with the API secret and hashed with SHA-1.

use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// The string that gets hashed, without the secret.
pub fn string_to_sign(params: &BTreeMap<&str, String>) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Lowercase hex SHA-1 signature of `params` under `api_secret`.
pub fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
