//! Package entity and request objects.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserId;

/// Validation errors returned by the constructors in this module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackageValidationError {
    /// Identifier was zero or negative.
    #[error("package id must be positive")]
    NonPositiveId,
    /// The package name was empty or whitespace.
    #[error("package name must not be empty")]
    EmptyName,
    /// A city field was empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyCity {
        /// Which city field failed: `senderCity` or `destinationCity`.
        field: &'static str,
    },
}

/// Stable package identifier: a positive database integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PackageId(i32);

impl PackageId {
    /// Validate and construct a [`PackageId`].
    pub const fn new(id: i32) -> Result<Self, PackageValidationError> {
        if id <= 0 {
            return Err(PackageValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// The raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A package record as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Unique identifier.
    pub id: PackageId,
    /// Sending user.
    pub sender_id: UserId,
    /// Receiving user.
    pub receiver_id: UserId,
    /// Short label shown in listings.
    pub name: String,
    /// Free-text description, optional.
    pub description: Option<String>,
    /// Origin city.
    pub sender_city: String,
    /// Destination city.
    pub destination_city: String,
    /// Whether tracking has been registered for this package.
    pub is_tracked: bool,
    /// Set once by the database at insert time.
    pub created_at: DateTime<Utc>,
}

/// Admin-facing package row joined with sender and receiver usernames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPackage {
    /// The package record.
    pub package: Package,
    /// Username of the sender, as stored.
    pub sender_username: String,
    /// Username of the receiver, as stored.
    pub receiver_username: String,
}

/// Validated request to create a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPackage {
    sender_id: UserId,
    receiver_id: UserId,
    name: String,
    description: Option<String>,
    sender_city: String,
    destination_city: String,
}

impl NewPackage {
    /// Validate and construct a [`NewPackage`].
    ///
    /// Whitespace-only descriptions are treated as absent.
    pub fn new(
        sender_id: UserId,
        receiver_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
        sender_city: impl Into<String>,
        destination_city: impl Into<String>,
    ) -> Result<Self, PackageValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PackageValidationError::EmptyName);
        }
        let sender_city = sender_city.into();
        if sender_city.trim().is_empty() {
            return Err(PackageValidationError::EmptyCity {
                field: "senderCity",
            });
        }
        let destination_city = destination_city.into();
        if destination_city.trim().is_empty() {
            return Err(PackageValidationError::EmptyCity {
                field: "destinationCity",
            });
        }
        let description = description.filter(|text| !text.trim().is_empty());
        Ok(Self {
            sender_id,
            receiver_id,
            name,
            description,
            sender_city,
            destination_city,
        })
    }

    /// Sending user.
    pub const fn sender_id(&self) -> UserId {
        self.sender_id
    }

    /// Receiving user.
    pub const fn receiver_id(&self) -> UserId {
        self.receiver_id
    }

    /// Package label.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Origin city.
    pub fn sender_city(&self) -> &str {
        self.sender_city.as_str()
    }

    /// Destination city.
    pub fn destination_city(&self) -> &str {
        self.destination_city.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn user(id: i32) -> UserId {
        UserId::new(id).expect("positive id")
    }

    #[rstest]
    #[case(5, true)]
    #[case(0, false)]
    #[case(-1, false)]
    fn package_id_requires_positive_values(#[case] raw: i32, #[case] ok: bool) {
        assert_eq!(PackageId::new(raw).is_ok(), ok);
    }

    #[test]
    fn new_package_accepts_a_complete_request() {
        let request = NewPackage::new(
            user(1),
            user(2),
            "Box A",
            Some("fragile".into()),
            "Lisbon",
            "Porto",
        )
        .expect("valid request");

        assert_eq!(request.name(), "Box A");
        assert_eq!(request.description(), Some("fragile"));
        assert_eq!(request.sender_city(), "Lisbon");
        assert_eq!(request.destination_city(), "Porto");
    }

    #[test]
    fn new_package_drops_blank_descriptions() {
        let request = NewPackage::new(user(1), user(2), "Box A", Some("  ".into()), "a", "b")
            .expect("valid request");
        assert_eq!(request.description(), None);
    }

    #[rstest]
    #[case("", "Lisbon", "Porto", PackageValidationError::EmptyName)]
    #[case("Box", " ", "Porto", PackageValidationError::EmptyCity { field: "senderCity" })]
    #[case("Box", "Lisbon", "", PackageValidationError::EmptyCity { field: "destinationCity" })]
    fn new_package_rejects_blank_fields(
        #[case] name: &str,
        #[case] sender_city: &str,
        #[case] destination_city: &str,
        #[case] expected: PackageValidationError,
    ) {
        let result = NewPackage::new(user(1), user(2), name, None, sender_city, destination_city);
        assert_eq!(result, Err(expected));
    }
}
