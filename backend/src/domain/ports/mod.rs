//! Domain ports: the traits adapters implement.
//!
//! Driven ports (repositories, hasher) are implemented by `outbound`
//! adapters; driving ports (the use-case traits) are what `inbound`
//! adapters call.

mod admin_directory;
mod auth_service;
mod credential_hasher;
mod directory_query;
mod error;
mod package_command;
mod package_repository;
mod tracking_command;
mod tracking_repository;
mod user_repository;

pub use self::admin_directory::AdminDirectoryQuery;
pub use self::auth_service::AuthService;
pub use self::credential_hasher::CredentialHasher;
pub use self::directory_query::DirectoryQuery;
pub use self::error::{HashError, PackageInsertError, PersistenceError, UserInsertError};
pub use self::package_command::PackageCommand;
pub use self::package_repository::PackageRepository;
pub use self::tracking_command::TrackingCommand;
pub use self::tracking_repository::{AppendOutcome, RegisterOutcome, TrackingRepository};
pub use self::user_repository::UserRepository;
