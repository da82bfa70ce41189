//! Driving port for the authentication use-cases.
//!
//! Inbound adapters call this to authenticate or register accounts without
//! importing the backing infrastructure, which keeps HTTP handler tests
//! deterministic: they substitute a stub instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::credentials::{LoginCredentials, Registration};
use crate::domain::error::DomainError;
use crate::domain::user::AuthenticatedUser;

/// Authentication operations exposed by the user service.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    ///
    /// Unknown usernames, wrong passwords, and malformed stored digests
    /// all fail with the same Unauthorized fault.
    async fn login(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, DomainError>;

    /// Create an account with role `client`.
    ///
    /// Fails with a Conflict fault when the username or email is taken.
    async fn register(&self, registration: &Registration) -> Result<(), DomainError>;
}
