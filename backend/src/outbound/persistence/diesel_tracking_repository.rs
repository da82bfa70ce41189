//! PostgreSQL-backed `TrackingRepository` using Diesel.
//!
//! Both write paths run inside a single transaction so the state check
//! and the checkpoint insert cannot interleave with a concurrent caller:
//! `register` uses a conditional update with an affected-rows guard,
//! `append` a `SELECT … FOR UPDATE` on the package row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::package::PackageId;
use crate::domain::ports::{
    AppendOutcome, PersistenceError, RegisterOutcome, TrackingRepository,
};
use crate::domain::tracking::{Checkpoint, CheckpointRequest};

use super::error_map::{map_diesel_error, map_pool_error};
use super::models::NewCheckpointRow;
use super::pool::DbPool;
use super::schema::{packages, tracking_checkpoints};

/// Diesel implementation of the [`TrackingRepository`] port.
#[derive(Clone)]
pub struct DieselTrackingRepository {
    pool: DbPool,
}

impl DieselTrackingRepository {
    /// Create a repository backed by the given pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn checkpoint_row(request: &CheckpointRequest) -> NewCheckpointRow {
    NewCheckpointRow {
        package_id: request.package_id().get(),
        city: request.city().to_owned(),
        recorded_at: request.recorded_at(),
    }
}

#[async_trait]
impl TrackingRepository for DieselTrackingRepository {
    async fn register(
        &self,
        request: &CheckpointRequest,
    ) -> Result<RegisterOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let package_id = request.package_id().get();
        let row = checkpoint_row(request);

        conn.transaction::<RegisterOutcome, diesel::result::Error, _>(|conn| {
            async move {
                let updated = diesel::update(
                    packages::table.filter(
                        packages::id
                            .eq(package_id)
                            .and(packages::is_tracked.eq(false)),
                    ),
                )
                .set(packages::is_tracked.eq(true))
                .execute(conn)
                .await?;

                if updated == 0 {
                    let exists: Option<i32> = packages::table
                        .filter(packages::id.eq(package_id))
                        .select(packages::id)
                        .first(conn)
                        .await
                        .optional()?;
                    return Ok(match exists {
                        Some(_) => RegisterOutcome::AlreadyTracked,
                        None => RegisterOutcome::NotFound,
                    });
                }

                diesel::insert_into(tracking_checkpoints::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(RegisterOutcome::Registered)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn append(
        &self,
        request: &CheckpointRequest,
    ) -> Result<AppendOutcome, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let package_id = request.package_id().get();
        let row = checkpoint_row(request);

        conn.transaction::<AppendOutcome, diesel::result::Error, _>(|conn| {
            async move {
                let tracked: Option<bool> = packages::table
                    .filter(packages::id.eq(package_id))
                    .select(packages::is_tracked)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                match tracked {
                    None => Ok(AppendOutcome::NotFound),
                    Some(false) => Ok(AppendOutcome::NotTracked),
                    Some(true) => {
                        diesel::insert_into(tracking_checkpoints::table)
                            .values(&row)
                            .execute(conn)
                            .await?;
                        Ok(AppendOutcome::Appended)
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn history(&self, package: PackageId) -> Result<Vec<Checkpoint>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(String, DateTime<Utc>)> = tracking_checkpoints::table
            .filter(tracking_checkpoints::package_id.eq(package.get()))
            .order(tracking_checkpoints::recorded_at.asc())
            .select((
                tracking_checkpoints::city,
                tracking_checkpoints::recorded_at,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(city, recorded_at)| Checkpoint { city, recorded_at })
            .collect())
    }
}
