//! Shared HTTP adapter state.
//!
//! Handlers receive these bundles via `actix_web::web::Data`, so they
//! depend only on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminDirectoryQuery, AuthService, DirectoryQuery, PackageCommand, TrackingCommand,
};

/// Dependency bundle for the user-service handlers.
#[derive(Clone)]
pub struct UserServiceState {
    /// Login and registration.
    pub auth: Arc<dyn AuthService>,
    /// Client-facing package queries.
    pub directory: Arc<dyn DirectoryQuery>,
}

/// Dependency bundle for the admin-service handlers.
#[derive(Clone)]
pub struct AdminServiceState {
    /// Unfiltered directory listings.
    pub directory: Arc<dyn AdminDirectoryQuery>,
    /// Package create/remove.
    pub packages: Arc<dyn PackageCommand>,
    /// Tracking-state transitions.
    pub tracking: Arc<dyn TrackingCommand>,
}
