//! Driving port for the client-facing package queries.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::package::{Package, PackageId};
use crate::domain::tracking::Checkpoint;
use crate::domain::user::UserId;

/// Read-only package queries exposed by the user service.
///
/// All three return empty sequences (never a fault) when nothing matches;
/// faults are reserved for malformed input and backend unavailability.
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Packages where `user` is sender or receiver, newest first.
    async fn list_packages(&self, user: UserId) -> Result<Vec<Package>, DomainError>;

    /// Membership-filtered listing narrowed by a substring match on name
    /// or description. A blank term returns the same set as
    /// [`DirectoryQuery::list_packages`].
    async fn search_packages(&self, user: UserId, term: &str)
    -> Result<Vec<Package>, DomainError>;

    /// A package's tracking history, oldest checkpoint first.
    async fn check_status(&self, package: PackageId) -> Result<Vec<Checkpoint>, DomainError>;
}
