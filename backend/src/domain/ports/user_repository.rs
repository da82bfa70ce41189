//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{NewUser, UserCredentials, UserId, UserSummary};

use super::error::{PersistenceError, UserInsertError};

/// Persistence port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the credential record for a username, if the account exists.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError>;

    /// Insert a new account and return its assigned id.
    ///
    /// A username or email collision is reported as
    /// [`UserInsertError::Duplicate`] without creating a row.
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserInsertError>;

    /// All accounts as (id, username), ordered by username ascending.
    async fn list_all(&self) -> Result<Vec<UserSummary>, PersistenceError>;
}
