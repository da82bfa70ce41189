//! Repository-backed implementation of the `TrackingCommand` port.
//!
//! Maps the repository's tracking outcomes to faults. Registering an
//! already-tracked package is a Conflict, not a silent duplicate insert:
//! the transition Untracked→Tracked happens at most once per package.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::ports::{
    AppendOutcome, RegisterOutcome, TrackingCommand, TrackingRepository,
};
use crate::domain::tracking::CheckpointRequest;

use super::map_persistence_error;

/// Tracking-state transitions for the admin surface.
#[derive(Clone)]
pub struct TrackingStateService {
    tracking: Arc<dyn TrackingRepository>,
}

impl TrackingStateService {
    /// Create the service from its port.
    pub fn new(tracking: Arc<dyn TrackingRepository>) -> Self {
        Self { tracking }
    }
}

#[async_trait]
impl TrackingCommand for TrackingStateService {
    async fn register_tracking(&self, request: &CheckpointRequest) -> Result<(), DomainError> {
        let package = request.package_id();
        match self
            .tracking
            .register(request)
            .await
            .map_err(map_persistence_error)?
        {
            RegisterOutcome::Registered => {
                info!(package = %package, city = request.city(), "tracking registered");
                Ok(())
            }
            RegisterOutcome::AlreadyTracked => Err(DomainError::conflict(format!(
                "package {package} is already tracked"
            ))),
            RegisterOutcome::NotFound => Err(DomainError::not_found(format!(
                "package {package} not found"
            ))),
        }
    }

    async fn update_status(&self, request: &CheckpointRequest) -> Result<(), DomainError> {
        let package = request.package_id();
        match self
            .tracking
            .append(request)
            .await
            .map_err(map_persistence_error)?
        {
            AppendOutcome::Appended => Ok(()),
            AppendOutcome::NotTracked => Err(DomainError::conflict(format!(
                "package {package} is not tracked"
            ))),
            AppendOutcome::NotFound => Err(DomainError::not_found(format!(
                "package {package} not found"
            ))),
        }
    }
}
