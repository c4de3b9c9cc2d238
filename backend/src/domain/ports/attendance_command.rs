//! Driving port for clock-in and clock-out mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, GeoPoint, UserId};

/// Position payload reported by the caretaker's device.
///
/// Validated into a [`GeoPoint`] at the service boundary; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionPayload {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl From<GeoPoint> for PositionPayload {
    fn from(value: GeoPoint) -> Self {
        Self {
            latitude: value.latitude(),
            longitude: value.longitude(),
        }
    }
}

/// Request to open a shift at the reported position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInRequest {
    /// Caretaker clocking in.
    pub user_id: UserId,
    /// Reported device position.
    pub position: PositionPayload,
}

/// Response from a successful clock-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockInResponse {
    /// Identifier of the opened session.
    pub session_id: Uuid,
    /// Server-side clock-in timestamp.
    pub clock_in_at: DateTime<Utc>,
}

/// Request to close the open shift at the reported position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutRequest {
    /// Caretaker clocking out.
    pub user_id: UserId,
    /// Reported device position.
    pub position: PositionPayload,
}

/// Response from a successful clock-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockOutResponse {
    /// Identifier of the closed session.
    pub session_id: Uuid,
    /// Clock-in timestamp of the closed session.
    pub clock_in_at: DateTime<Utc>,
    /// Server-side clock-out timestamp.
    pub clock_out_at: DateTime<Utc>,
    /// Minutes worked during the session.
    pub worked_minutes: i64,
}

/// Driving port for attendance mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCommand: Send + Sync {
    /// Open a shift session, gated on the geofence.
    async fn clock_in(&self, request: ClockInRequest) -> Result<ClockInResponse, DomainError>;

    /// Close the open shift session, gated on the geofence.
    async fn clock_out(&self, request: ClockOutRequest) -> Result<ClockOutResponse, DomainError>;
}

/// Fixture command for handler tests that do not exercise attendance.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAttendanceCommand;

#[async_trait]
impl AttendanceCommand for FixtureAttendanceCommand {
    async fn clock_in(&self, _request: ClockInRequest) -> Result<ClockInResponse, DomainError> {
        Ok(ClockInResponse {
            session_id: Uuid::new_v4(),
            clock_in_at: Utc::now(),
        })
    }

    async fn clock_out(&self, _request: ClockOutRequest) -> Result<ClockOutResponse, DomainError> {
        let now = Utc::now();
        Ok(ClockOutResponse {
            session_id: Uuid::new_v4(),
            clock_in_at: now,
            clock_out_at: now,
            worked_minutes: 0,
        })
    }
}
