//! PostgreSQL-backed `AttendanceRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AttendanceRepository, AttendanceRepositoryError};
use crate::domain::{ShiftSession, UserId};

use super::models::{NewShiftSessionRow, ShiftSessionRow};
use super::pool::{DbPool, PoolError};
use super::schema::shift_sessions;

/// Diesel-backed implementation of the `AttendanceRepository` port.
#[derive(Clone)]
pub struct DieselAttendanceRepository {
    pool: DbPool,
}

impl DieselAttendanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AttendanceRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AttendanceRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> AttendanceRepositoryError {
    debug!(error = %error, "diesel operation failed");
    match error {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            _,
        ) => AttendanceRepositoryError::connection("database connection error"),
        _ => AttendanceRepositoryError::query("database error"),
    }
}

fn row_to_session(row: ShiftSessionRow) -> Result<ShiftSession, AttendanceRepositoryError> {
    ShiftSession::from_parts(
        row.id,
        UserId::from_uuid(row.user_id),
        row.clock_in_at,
        row.clock_out_at,
    )
    .map_err(|err| {
        AttendanceRepositoryError::query(format!("invalid stored session {}: {err}", row.id))
    })
}

fn session_to_row(session: &ShiftSession) -> NewShiftSessionRow {
    NewShiftSessionRow {
        id: session.id(),
        user_id: *session.user_id().as_uuid(),
        clock_in_at: session.clock_in_at(),
        clock_out_at: session.clock_out_at(),
    }
}

#[async_trait]
impl AttendanceRepository for DieselAttendanceRepository {
    async fn insert(&self, session: &ShiftSession) -> Result<(), AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(shift_sessions::table)
            .values(&session_to_row(session))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_open_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ShiftSession>, AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ShiftSessionRow> = shift_sessions::table
            .filter(shift_sessions::user_id.eq(user_id.as_uuid()))
            .filter(shift_sessions::clock_out_at.is_null())
            .order(shift_sessions::clock_in_at.desc())
            .select(ShiftSessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_session).transpose()
    }

    async fn update(&self, session: &ShiftSession) -> Result<(), AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(shift_sessions::table.filter(shift_sessions::id.eq(session.id())))
            .set(shift_sessions::clock_out_at.eq(session.clock_out_at()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_completed_between(
        &self,
        user_id: &UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ShiftSession>, AttendanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ShiftSessionRow> = shift_sessions::table
            .filter(shift_sessions::user_id.eq(user_id.as_uuid()))
            .filter(shift_sessions::clock_out_at.is_not_null())
            .filter(shift_sessions::clock_in_at.ge(from))
            .filter(shift_sessions::clock_in_at.lt(to))
            .order(shift_sessions::clock_in_at.asc())
            .select(ShiftSessionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_session).collect()
    }
}
