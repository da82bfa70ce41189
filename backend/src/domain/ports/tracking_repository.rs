//! Port abstraction for tracking-state persistence adapters.
//!
//! Both write operations run their state check and checkpoint insert in a
//! single database transaction so concurrent callers cannot both observe
//! "untracked"; the outcome enums make every terminal state explicit
//! instead of collapsing them into one boolean.

use async_trait::async_trait;

use crate::domain::package::PackageId;
use crate::domain::tracking::{Checkpoint, CheckpointRequest};

use super::error::PersistenceError;

/// Result of attempting to register tracking for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The package was untracked; it is now tracked and holds its first
    /// checkpoint.
    Registered,
    /// The package was already tracked; nothing was written.
    AlreadyTracked,
    /// No package with that id exists.
    NotFound,
}

/// Result of attempting to append a status checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The checkpoint was appended.
    Appended,
    /// The package exists but is not tracked; nothing was written.
    NotTracked,
    /// No package with that id exists.
    NotFound,
}

/// Persistence port for tracking state and checkpoint history.
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Atomically flip an untracked package to tracked and write its first
    /// checkpoint.
    async fn register(
        &self,
        request: &CheckpointRequest,
    ) -> Result<RegisterOutcome, PersistenceError>;

    /// Append a checkpoint to a tracked package.
    async fn append(&self, request: &CheckpointRequest)
    -> Result<AppendOutcome, PersistenceError>;

    /// Checkpoint history for a package, oldest first. Unknown packages
    /// yield an empty history.
    async fn history(&self, package: PackageId) -> Result<Vec<Checkpoint>, PersistenceError>;
}
