//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Partial reads use plain tuples instead of dedicated structs.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{packages, tracking_checkpoints, users};

/// Row struct for reading full package records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = packages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PackageRow {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub sender_city: String,
    pub destination_city: String,
    pub is_tracked: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating package records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = packages)]
pub(crate) struct NewPackageRow {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub sender_city: String,
    pub destination_city: String,
    pub is_tracked: bool,
}

/// Insertable struct for creating accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

/// Insertable struct for appending checkpoints.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tracking_checkpoints)]
pub(crate) struct NewCheckpointRow {
    pub package_id: i32,
    pub city: String,
    pub recorded_at: DateTime<Utc>,
}
