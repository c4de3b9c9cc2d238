//! Port for shift session persistence and timesheet reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ShiftSession, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by attendance repository adapters.
    pub enum AttendanceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "attendance repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "attendance repository query failed: {message}",
    }
}

/// Port for writing shift sessions and reading completed ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Persist a newly opened session.
    async fn insert(&self, session: &ShiftSession) -> Result<(), AttendanceRepositoryError>;

    /// Fetch the user's open session, if one exists.
    async fn find_open_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ShiftSession>, AttendanceRepositoryError>;

    /// Replace a stored session, e.g. after closing it.
    async fn update(&self, session: &ShiftSession) -> Result<(), AttendanceRepositoryError>;

    /// Completed sessions whose clock-in falls in `[from, to)`, in clock-in
    /// order.
    async fn list_completed_between(
        &self,
        user_id: &UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ShiftSession>, AttendanceRepositoryError>;
}

/// Fixture repository for tests that do not exercise attendance persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAttendanceRepository;

#[async_trait]
impl AttendanceRepository for FixtureAttendanceRepository {
    async fn insert(&self, _session: &ShiftSession) -> Result<(), AttendanceRepositoryError> {
        Ok(())
    }

    async fn find_open_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<ShiftSession>, AttendanceRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _session: &ShiftSession) -> Result<(), AttendanceRepositoryError> {
        Ok(())
    }

    async fn list_completed_between(
        &self,
        _user_id: &UserId,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<Vec<ShiftSession>, AttendanceRepositoryError> {
        Ok(Vec::new())
    }
}
