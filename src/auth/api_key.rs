// API key generation and verification
// Keys are shown to the caller once and stored only as bcrypt hashes

use bcrypt::{hash, verify, BcryptError};
use rand::RngCore;

/// Marker that starts every issued key
pub const KEY_MARKER: &str = "ak_";

/// Number of random bytes behind a key (hex encoded in the key itself)
const KEY_BYTES: usize = 32;

/// Length of the stored lookup prefix: the marker plus 8 hex characters
pub const KEY_PREFIX_LEN: usize = 11;

/// bcrypt cost for key hashes
const KEY_HASH_COST: u32 = 10;

/// Generates a new plaintext API key
///
/// # Returns
/// `ak_` followed by 64 lowercase hex characters
///
/// # Example
/// ```
/// use managehub_api::auth::api_key::generate_api_key;
///
/// let key = generate_api_key();
/// assert!(key.starts_with("ak_"));
/// assert_eq!(key.len(), 67);
/// ```
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}{}", KEY_MARKER, hex::encode(bytes))
}

/// Extracts the lookup prefix of a key
///
/// Returns `None` for anything that cannot be an issued key, so malformed
/// input never reaches the database.
pub fn key_prefix(key: &str) -> Option<&str> {
    if !key.starts_with(KEY_MARKER) || !key.is_ascii() || key.len() < KEY_PREFIX_LEN {
        return None;
    }
    Some(&key[..KEY_PREFIX_LEN])
}

/// Hashes a plaintext key for storage
pub fn hash_api_key(key: &str) -> Result<String, BcryptError> {
    hash(key, KEY_HASH_COST)
}

/// Checks a presented key against a stored hash; a malformed hash never matches
///
/// bcrypt is CPU bound, so async callers run this on the blocking pool.
pub fn verify_api_key(key: &str, key_hash: &str) -> bool {
    verify(key, key_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_unique_and_well_formed() {
        let a = generate_api_key();
        let b = generate_api_key();

        assert_ne!(a, b);
        assert_eq!(a.len(), KEY_MARKER.len() + KEY_BYTES * 2);
        assert!(a[KEY_MARKER.len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn prefix_of_issued_key() {
        let key = generate_api_key();
        let prefix = key_prefix(&key).unwrap();
        assert_eq!(prefix.len(), KEY_PREFIX_LEN);
        assert!(key.starts_with(prefix));
    }

    #[test]
    fn prefix_rejects_foreign_input() {
        assert_eq!(key_prefix("sk_live_1234567890"), None);
        assert_eq!(key_prefix("ak_123"), None);
        assert_eq!(key_prefix("ak_ééééééééé"), None);
    }

    #[test]
    fn hash_and_verify() {
        let key = generate_api_key();
        let hashed = hash_api_key(&key).unwrap();

        assert!(verify_api_key(&key, &hashed));
        assert!(!verify_api_key(&generate_api_key(), &hashed));
        assert!(!verify_api_key(&key, "not-a-bcrypt-hash"));
    }
}
