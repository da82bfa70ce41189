//! Errors shared by persistence ports.
//!
//! Absence is never an error: lookups return `Ok(None)`, listings an empty
//! `Vec`, deletions `false`. These variants exist so the service layer can
//! tell "backend unreachable" apart from "statement failed" and classify
//! the resulting fault correctly.

/// Failure raised by a persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// No connection to the backing store could be obtained.
    #[error("database connection failed: {message}")]
    Connection {
        /// Adapter-level detail, logged but never shown to callers.
        message: String,
    },
    /// The statement ran and failed.
    #[error("database query failed: {message}")]
    Query {
        /// Adapter-level detail, logged but never shown to callers.
        message: String,
    },
}

impl PersistenceError {
    /// Construct a [`PersistenceError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`PersistenceError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Failure raised when inserting a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserInsertError {
    /// The username or email is already taken.
    #[error("username or email already in use")]
    Duplicate,
    /// The insert failed for infrastructure reasons.
    #[error(transparent)]
    Backend(#[from] PersistenceError),
}

/// Failure raised when inserting a package.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackageInsertError {
    /// Sender or receiver does not reference an existing user.
    #[error("sender or receiver does not exist")]
    UnknownUser,
    /// The insert failed for infrastructure reasons.
    #[error(transparent)]
    Backend(#[from] PersistenceError),
}

/// Failure raised while hashing a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct HashError {
    /// Hasher-level detail.
    pub message: String,
}

impl HashError {
    /// Construct a [`HashError`].
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
