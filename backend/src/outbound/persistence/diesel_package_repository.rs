//! PostgreSQL-backed `PackageRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::package::{AdminPackage, NewPackage, Package, PackageId};
use crate::domain::ports::{PackageInsertError, PackageRepository, PersistenceError};
use crate::domain::user::UserId;

use super::error_map::{map_diesel_error, map_pool_error, stored_package_id, stored_user_id};
use super::models::{NewPackageRow, PackageRow};
use super::pool::DbPool;
use super::schema::{packages, users};

diesel::alias!(users as senders: SenderUser, users as receivers: ReceiverUser);

/// Diesel implementation of the [`PackageRepository`] port.
#[derive(Clone)]
pub struct DieselPackageRepository {
    pool: DbPool,
}

impl DieselPackageRepository {
    /// Create a repository backed by the given pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_package(row: PackageRow) -> Result<Package, PersistenceError> {
    Ok(Package {
        id: stored_package_id(row.id)?,
        sender_id: stored_user_id(row.sender_id)?,
        receiver_id: stored_user_id(row.receiver_id)?,
        name: row.name,
        description: row.description,
        sender_city: row.sender_city,
        destination_city: row.destination_city,
        is_tracked: row.is_tracked,
        created_at: row.created_at,
    })
}

#[async_trait]
impl PackageRepository for DieselPackageRepository {
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Package>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PackageRow> = packages::table
            .filter(
                packages::sender_id
                    .eq(user.get())
                    .or(packages::receiver_id.eq(user.get())),
            )
            .order(packages::created_at.desc())
            .select(PackageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_package).collect()
    }

    async fn search_for_user(
        &self,
        user: UserId,
        term: &str,
    ) -> Result<Vec<Package>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Wildcard-wrapped, case-insensitive, matching name OR description.
        let pattern = format!("%{term}%");
        let rows: Vec<PackageRow> = packages::table
            .filter(
                packages::sender_id
                    .eq(user.get())
                    .or(packages::receiver_id.eq(user.get())),
            )
            .filter(
                packages::name
                    .ilike(pattern.clone())
                    .nullable()
                    .or(packages::description.ilike(pattern)),
            )
            .order(packages::created_at.desc())
            .select(PackageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_package).collect()
    }

    async fn insert(&self, package: &NewPackage) -> Result<PackageId, PackageInsertError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| PackageInsertError::Backend(map_pool_error(err)))?;

        let row = NewPackageRow {
            sender_id: package.sender_id().get(),
            receiver_id: package.receiver_id().get(),
            name: package.name().to_owned(),
            description: package.description().map(str::to_owned),
            sender_city: package.sender_city().to_owned(),
            destination_city: package.destination_city().to_owned(),
            is_tracked: false,
        };

        let id: i32 = diesel::insert_into(packages::table)
            .values(&row)
            .returning(packages::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    PackageInsertError::UnknownUser
                }
                other => PackageInsertError::Backend(map_diesel_error(other)),
            })?;

        stored_package_id(id).map_err(PackageInsertError::Backend)
    }

    async fn delete(&self, package: PackageId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(packages::table.filter(packages::id.eq(package.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_all_joined(&self) -> Result<Vec<AdminPackage>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PackageRow, String, String)> = packages::table
            .inner_join(senders.on(packages::sender_id.eq(senders.field(users::id))))
            .inner_join(receivers.on(packages::receiver_id.eq(receivers.field(users::id))))
            .order(packages::created_at.desc())
            .select((
                PackageRow::as_select(),
                senders.field(users::username),
                receivers.field(users::username),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(row, sender_username, receiver_username)| {
                Ok(AdminPackage {
                    package: row_to_package(row)?,
                    sender_username,
                    receiver_username,
                })
            })
            .collect()
    }
}
