//! Tracking checkpoints and the checkpoint request object.
//!
//! A package starts untracked. A successful `registerTracking` flips it to
//! tracked and writes the first checkpoint; `updateStatus` appends further
//! checkpoints while the package stays tracked. Tracked is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::package::PackageId;

/// Validation errors for checkpoint requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingValidationError {
    /// The city was empty or whitespace.
    #[error("city must not be empty")]
    EmptyCity,
}

/// One (city, timestamp) record in a package's tracking history.
///
/// History is returned ordered by `recorded_at` ascending. Out-of-order
/// submissions are accepted as given; ordering is applied on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Where the package was observed.
    pub city: String,
    /// When the observation was made (UTC).
    pub recorded_at: DateTime<Utc>,
}

/// Validated input for `registerTracking` and `updateStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointRequest {
    package_id: PackageId,
    city: String,
    recorded_at: DateTime<Utc>,
}

impl CheckpointRequest {
    /// Validate and construct a [`CheckpointRequest`].
    pub fn new(
        package_id: PackageId,
        city: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, TrackingValidationError> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(TrackingValidationError::EmptyCity);
        }
        Ok(Self {
            package_id,
            city,
            recorded_at,
        })
    }

    /// The package the checkpoint belongs to.
    pub const fn package_id(&self) -> PackageId {
        self.package_id
    }

    /// Where the package was observed.
    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    /// When the observation was made.
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn package(id: i32) -> PackageId {
        PackageId::new(id).expect("positive id")
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    #[test]
    fn request_carries_its_parts() {
        let request =
            CheckpointRequest::new(package(4), "Porto", at(1_700_000_000)).expect("valid request");
        assert_eq!(request.package_id().get(), 4);
        assert_eq!(request.city(), "Porto");
        assert_eq!(request.recorded_at(), at(1_700_000_000));
    }

    #[test]
    fn blank_city_is_rejected() {
        let result = CheckpointRequest::new(package(4), "   ", at(0));
        assert_eq!(result, Err(TrackingValidationError::EmptyCity));
    }
}
