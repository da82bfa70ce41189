//! Driving port for tracking-state transitions.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::tracking::CheckpointRequest;

/// Tracking operations exposed by the admin service.
///
/// Per-package state machine: {Untracked, Tracked}. `register_tracking`
/// is the only transition Untracked→Tracked; Tracked is terminal;
/// `update_status` is a self-loop on Tracked.
#[async_trait]
pub trait TrackingCommand: Send + Sync {
    /// Flip an untracked package to tracked and record its first
    /// checkpoint. An already-tracked package fails with a Conflict fault
    /// and appends nothing; a missing package with NotFound.
    async fn register_tracking(&self, request: &CheckpointRequest) -> Result<(), DomainError>;

    /// Append a checkpoint to a tracked package. An untracked package
    /// fails with a Conflict fault and appends nothing; a missing package
    /// with NotFound.
    async fn update_status(&self, request: &CheckpointRequest) -> Result<(), DomainError>;
}
