//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories via Diesel with bb8 pooling
//! - **security**: Argon2id credential hashing
//! - **services**: use-case implementations composing the above

pub mod persistence;
pub mod security;
pub mod services;
