//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/db/schema.sql` exactly; Diesel uses these for
//! type-safe SQL generation.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Unique account name.
        username -> Varchar,
        /// Argon2id digest in PHC string format.
        password_hash -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// `client` or `admin`.
        role -> Varchar,
        /// Set once at insert time.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Package records.
    packages (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Sending user (FK to users).
        sender_id -> Int4,
        /// Receiving user (FK to users).
        receiver_id -> Int4,
        /// Short label.
        name -> Varchar,
        /// Optional free text.
        description -> Nullable<Text>,
        /// Origin city.
        sender_city -> Varchar,
        /// Destination city.
        destination_city -> Varchar,
        /// Flipped true exactly once by tracking registration.
        is_tracked -> Bool,
        /// Set once at insert time.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only tracking history.
    tracking_checkpoints (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Owning package (FK, cascade on delete).
        package_id -> Int4,
        /// Where the package was observed.
        city -> Varchar,
        /// When the observation was made.
        recorded_at -> Timestamptz,
    }
}

diesel::joinable!(tracking_checkpoints -> packages (package_id));

diesel::allow_tables_to_appear_in_same_query!(users, packages, tracking_checkpoints);
