//! PostgreSQL-backed `UserRepository` using Diesel.
//!
//! A thin adapter: translates rows to domain types and Diesel errors to
//! port errors. Uniqueness is enforced by the database's unique indexes,
//! not a read-then-insert check, so concurrent registrations cannot both
//! succeed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PersistenceError, UserInsertError, UserRepository};
use crate::domain::user::{NewUser, Role, UserCredentials, UserId, UserSummary};

use super::error_map::{map_diesel_error, map_pool_error, stored_user_id};
use super::models::NewUserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository backed by the given pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(i32, String, String)> = users::table
            .filter(users::username.eq(username))
            .select((users::id, users::password_hash, users::role))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(id, password_hash, role)| {
            Ok(UserCredentials {
                id: stored_user_id(id)?,
                password_hash,
                role: Role::from_stored(&role),
            })
        })
        .transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, UserInsertError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserInsertError::Backend(map_pool_error(err)))?;

        let row = NewUserRow {
            username: user.username.as_ref().to_owned(),
            password_hash: user.password_hash.clone(),
            email: user.email.as_ref().to_owned(),
            role: user.role.as_str().to_owned(),
        };

        let id: i32 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    UserInsertError::Duplicate
                }
                other => UserInsertError::Backend(map_diesel_error(other)),
            })?;

        stored_user_id(id).map_err(UserInsertError::Backend)
    }

    async fn list_all(&self) -> Result<Vec<UserSummary>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(i32, String)> = users::table
            .select((users::id, users::username))
            .order(users::username.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(id, username)| {
                Ok(UserSummary {
                    id: stored_user_id(id)?,
                    username,
                })
            })
            .collect()
    }
}
