// Member password rules and bcrypt hashing

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

use crate::domain::errors::{DomainError, DomainResult};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Rejects passwords shorter than [`MIN_PASSWORD_LEN`] characters
pub fn check_strength(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Hashes a password with a fresh salt
///
/// # Example
/// ```
/// use managehub_api::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(verify_password("correct horse", &hash).unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Compares a password with a stored hash; a malformed hash is an error
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_counts_characters() {
        assert!(check_strength("short").is_err());
        assert!(check_strength("exactly8").is_ok());
        // Eight characters, more than eight bytes
        assert!(check_strength("pässwörd").is_ok());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("hub-member-pass").unwrap();
        assert!(!verify_password("hub-member-fail", &hash).unwrap());
    }

    #[test]
    fn salted_hashes_differ() {
        let first = hash_password("hub-member-pass").unwrap();
        let second = hash_password("hub-member-pass").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("hub-member-pass", &second).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
