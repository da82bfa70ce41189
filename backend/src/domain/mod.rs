//! Domain entities, value types, faults, and ports.
//!
//! Types here are transport and storage agnostic. Constructors validate
//! invariants up front so adapters never see half-formed values.

pub mod credentials;
pub mod error;
pub mod package;
pub mod ports;
pub mod tracking;
pub mod user;

pub use self::credentials::{CredentialValidationError, LoginCredentials, Registration};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode, FaultClass};
pub use self::package::{AdminPackage, NewPackage, Package, PackageId, PackageValidationError};
pub use self::tracking::{Checkpoint, CheckpointRequest, TrackingValidationError};
pub use self::user::{
    AuthenticatedUser, Email, NewUser, Role, UserCredentials, UserId, UserSummary,
    UserValidationError, Username,
};
