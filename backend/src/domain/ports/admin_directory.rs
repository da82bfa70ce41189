//! Driving port for the admin-facing directory listings.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::package::AdminPackage;
use crate::domain::user::UserSummary;

/// Unfiltered listings exposed by the admin service.
#[async_trait]
pub trait AdminDirectoryQuery: Send + Sync {
    /// All accounts, ordered by username ascending.
    async fn list_all_users(&self) -> Result<Vec<UserSummary>, DomainError>;

    /// All packages joined with sender/receiver usernames, newest first.
    async fn list_all_packages(&self) -> Result<Vec<AdminPackage>, DomainError>;
}
