//! Mapping from pool and Diesel errors to port errors, plus row-to-domain
//! identifier helpers.

use tracing::debug;

use crate::domain::package::PackageId;
use crate::domain::ports::PersistenceError;
use crate::domain::user::UserId;

use super::pool::PoolError;

/// Serial columns are always positive; a non-positive id means the row is
/// corrupt, which is a query-level failure rather than a domain fault.
pub(crate) fn stored_user_id(id: i32) -> Result<UserId, PersistenceError> {
    UserId::new(id).map_err(|err| PersistenceError::query(format!("users row: {err}")))
}

/// See [`stored_user_id`].
pub(crate) fn stored_package_id(id: i32) -> Result<PackageId, PersistenceError> {
    PackageId::new(id).map_err(|err| PersistenceError::query(format!("packages row: {err}")))
}

/// Pool failures mean the backend is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> PersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PersistenceError::connection(message)
        }
    }
}

/// Diesel failures keep their detail server-side; only the category
/// crosses the port boundary.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> PersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => PersistenceError::query("database error"),
        _ => PersistenceError::query("database error"),
    }
}
