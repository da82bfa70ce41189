//! Driving port for package administration.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::package::{NewPackage, PackageId};

/// Package create/remove operations exposed by the admin service.
#[async_trait]
pub trait PackageCommand: Send + Sync {
    /// Create a package (untracked) and return its assigned id.
    async fn add_package(&self, request: &NewPackage) -> Result<PackageId, DomainError>;

    /// Remove a package. A missing package fails with a NotFound fault,
    /// so a second removal of the same id is observably different from
    /// the first.
    async fn remove_package(&self, package: PackageId) -> Result<(), DomainError>;
}
