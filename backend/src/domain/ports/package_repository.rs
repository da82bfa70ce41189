//! Port abstraction for package persistence adapters.

use async_trait::async_trait;

use crate::domain::package::{AdminPackage, NewPackage, Package, PackageId};
use crate::domain::user::UserId;

use super::error::{PackageInsertError, PersistenceError};

/// Persistence port for package records.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Packages where `user` is sender or receiver, newest first.
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Package>, PersistenceError>;

    /// Membership-filtered listing narrowed by a case-insensitive substring
    /// match on name or description, newest first.
    async fn search_for_user(
        &self,
        user: UserId,
        term: &str,
    ) -> Result<Vec<Package>, PersistenceError>;

    /// Insert a package and return its assigned id.
    ///
    /// An unknown sender or receiver is reported as
    /// [`PackageInsertError::UnknownUser`].
    async fn insert(&self, package: &NewPackage) -> Result<PackageId, PackageInsertError>;

    /// Delete a package; `false` when no row matched.
    async fn delete(&self, package: PackageId) -> Result<bool, PersistenceError>;

    /// Every package joined with sender and receiver usernames, newest
    /// first.
    async fn list_all_joined(&self) -> Result<Vec<AdminPackage>, PersistenceError>;
}
