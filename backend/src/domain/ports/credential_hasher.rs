//! Port abstraction for password digest computation and verification.

use super::error::HashError;

/// Memory-hard, salted password hashing.
///
/// `hash` uses a fresh random salt per call, so hashing the same input
/// twice yields different digests. `verify` collapses every failure mode
/// (mismatch, malformed digest) to `false` and never panics; callers must
/// not be able to distinguish them.
pub trait CredentialHasher: Send + Sync {
    /// Compute a digest for `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;

    /// `true` only when `plaintext` matches `digest` exactly.
    fn verify(&self, digest: &str, plaintext: &str) -> bool;
}
