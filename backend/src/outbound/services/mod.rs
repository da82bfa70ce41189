//! Use-case service implementations.
//!
//! Each service composes repository/hasher ports behind a driving port,
//! turning typed persistence results into domain faults. They hold
//! `Arc<dyn Port>` handles so tests substitute stubs and production wires
//! the Diesel adapters.

mod auth;
mod directory;
mod package_admin;
mod tracking;

pub use auth::PasswordAuthService;
pub use directory::{AdminDirectory, PackageDirectory};
pub use package_admin::PackageAdminService;
pub use tracking::TrackingStateService;

use tracing::error;

use crate::domain::DomainError;
use crate::domain::ports::PersistenceError;

/// Shared fault mapping: connection loss is a server-classified
/// unavailability, anything else an internal error. Detail is logged here
/// and never reaches the caller.
pub(crate) fn map_persistence_error(err: PersistenceError) -> DomainError {
    match err {
        PersistenceError::Connection { message } => {
            error!(detail = %message, "backing store unavailable");
            DomainError::service_unavailable("service temporarily unavailable")
        }
        PersistenceError::Query { message } => {
            error!(detail = %message, "database operation failed");
            DomainError::internal("database operation failed")
        }
    }
}
