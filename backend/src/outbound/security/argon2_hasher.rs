//! Argon2id implementation of the `CredentialHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::domain::ports::{CredentialHasher, HashError};

/// Memory-hard password hashing with default Argon2id parameters.
///
/// Digests are PHC strings carrying algorithm, parameters, and salt, so
/// `verify` needs no configuration beyond the digest itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|err| HashError::new(err.to_string()))
    }

    fn verify(&self, digest: &str, plaintext: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_hashes_to_distinct_digests_that_both_verify() {
        let hasher = Argon2CredentialHasher;
        let first = hasher.hash("correct horse").expect("hash");
        let second = hasher.hash("correct horse").expect("hash");

        assert_ne!(first, second, "per-call salts must differ");
        assert!(hasher.verify(&first, "correct horse"));
        assert!(hasher.verify(&second, "correct horse"));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hasher = Argon2CredentialHasher;
        let digest = hasher.hash("correct horse").expect("hash");
        assert!(!hasher.verify(&digest, "battery staple"));
    }

    #[test]
    fn malformed_digest_collapses_to_false() {
        let hasher = Argon2CredentialHasher;
        assert!(!hasher.verify("", "anything"));
        assert!(!hasher.verify("not-a-phc-string", "anything"));
        assert!(!hasher.verify("$argon2id$broken", "anything"));
    }
}
