//! PostgreSQL persistence adapters using Diesel.
//!
//! Thin adapters implementing the domain repository ports: they translate
//! between Diesel rows and domain types and map infrastructure errors to
//! port errors. Row structs and table definitions stay private to this
//! module. Connections come from a bounded bb8 pool built once at startup;
//! the reference DDL lives in `backend/db/schema.sql`.

mod diesel_package_repository;
mod diesel_tracking_repository;
mod diesel_user_repository;
mod error_map;
mod models;
mod pool;
mod schema;

pub use diesel_package_repository::DieselPackageRepository;
pub use diesel_tracking_repository::DieselTrackingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
