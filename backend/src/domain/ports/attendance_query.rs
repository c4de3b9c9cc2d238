//! Driving port for timesheet reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, TimesheetSummary, UserId};

/// Request for a user's timesheet over a half-open range `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetRequest {
    /// User whose completed sessions are summarised.
    pub user_id: UserId,
    /// Inclusive start of the range.
    pub from: DateTime<Utc>,
    /// Exclusive end of the range.
    pub to: DateTime<Utc>,
}

/// One completed session in a timesheet response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntryPayload {
    /// Originating session.
    pub session_id: Uuid,
    /// Clock-in timestamp.
    pub clock_in_at: DateTime<Utc>,
    /// Clock-out timestamp.
    pub clock_out_at: DateTime<Utc>,
    /// Worked minutes.
    pub minutes: i64,
}

/// Timesheet response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetResponse {
    /// Owning user.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    /// Completed sessions in clock-in order.
    pub entries: Vec<TimesheetEntryPayload>,
    /// Total worked minutes across the entries.
    pub total_minutes: i64,
}

impl From<TimesheetSummary> for TimesheetResponse {
    fn from(value: TimesheetSummary) -> Self {
        Self {
            user_id: value.user_id,
            entries: value
                .entries
                .into_iter()
                .map(|entry| TimesheetEntryPayload {
                    session_id: entry.session_id,
                    clock_in_at: entry.clock_in_at,
                    clock_out_at: entry.clock_out_at,
                    minutes: entry.minutes,
                })
                .collect(),
            total_minutes: value.total_minutes,
        }
    }
}

/// Driving port for timesheet reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceQuery: Send + Sync {
    /// Summarise the user's completed sessions over the requested range.
    async fn timesheet(&self, request: TimesheetRequest)
    -> Result<TimesheetResponse, DomainError>;
}

/// Fixture query returning an empty timesheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAttendanceQuery;

#[async_trait]
impl AttendanceQuery for FixtureAttendanceQuery {
    async fn timesheet(
        &self,
        request: TimesheetRequest,
    ) -> Result<TimesheetResponse, DomainError> {
        Ok(TimesheetResponse {
            user_id: request.user_id,
            entries: Vec::new(),
            total_minutes: 0,
        })
    }
}
