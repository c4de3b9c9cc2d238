//! PostgreSQL-backed `AnchorRepository` implementation using Diesel.
//!
//! The anchor is a singleton; the table's check constraint pins the row id
//! to 1 and writes upsert against that id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AnchorRepository, AnchorRepositoryError};
use crate::domain::{AnchorLocation, GeoPoint};

use super::models::{AnchorLocationRow, NewAnchorLocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::anchor_locations;

const SINGLETON_ID: i16 = 1;

/// Diesel-backed implementation of the `AnchorRepository` port.
#[derive(Clone)]
pub struct DieselAnchorRepository {
    pool: DbPool,
}

impl DieselAnchorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AnchorRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AnchorRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> AnchorRepositoryError {
    debug!(error = %error, "diesel operation failed");
    match error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            _,
        ) => AnchorRepositoryError::connection("database connection error"),
        _ => AnchorRepositoryError::query("database error"),
    }
}

fn row_to_anchor(row: AnchorLocationRow) -> Result<AnchorLocation, AnchorRepositoryError> {
    let center = GeoPoint::new(row.latitude, row.longitude)
        .map_err(|err| AnchorRepositoryError::query(format!("invalid stored anchor: {err}")))?;
    AnchorLocation::new(center, row.radius_km)
        .map_err(|err| AnchorRepositoryError::query(format!("invalid stored anchor: {err}")))
}

#[async_trait]
impl AnchorRepository for DieselAnchorRepository {
    async fn get(&self) -> Result<Option<AnchorLocation>, AnchorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<AnchorLocationRow> = anchor_locations::table
            .filter(anchor_locations::id.eq(SINGLETON_ID))
            .select(AnchorLocationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_anchor).transpose()
    }

    async fn set(&self, anchor: &AnchorLocation) -> Result<(), AnchorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAnchorLocationRow {
            id: SINGLETON_ID,
            latitude: anchor.center().latitude(),
            longitude: anchor.center().longitude(),
            radius_km: anchor.radius_km(),
        };

        diesel::insert_into(anchor_locations::table)
            .values(&new_row)
            .on_conflict(anchor_locations::id)
            .do_update()
            .set((
                anchor_locations::latitude.eq(new_row.latitude),
                anchor_locations::longitude.eq(new_row.longitude),
                anchor_locations::radius_km.eq(new_row.radius_km),
                anchor_locations::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
