//! Identifier parameter validation shared by the operation handlers.

use serde_json::json;

use crate::domain::{DomainError, PackageId, UserId};

/// Validate a raw `userId` parameter.
pub(crate) fn user_id_param(raw: i32) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|err| {
        DomainError::invalid_request(err.to_string()).with_details(json!({ "field": "userId" }))
    })
}

/// Validate a raw `packageId` parameter.
pub(crate) fn package_id_param(raw: i32) -> Result<PackageId, DomainError> {
    PackageId::new(raw).map_err(|err| {
        DomainError::invalid_request(err.to_string()).with_details(json!({ "field": "packageId" }))
    })
}
