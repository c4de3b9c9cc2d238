//! Attendance API handlers.
//!
//! ```text
//! POST /api/v1/attendance/clock-in {"position":{"latitude":..,"longitude":..}}
//! POST /api/v1/attendance/clock-out {"position":{"latitude":..,"longitude":..}}
//! GET /api/v1/attendance/timesheet?from=..&to=..[&userId=..]
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ClockInRequest, ClockInResponse, ClockOutRequest, ClockOutResponse, PositionPayload,
    TimesheetRequest, TimesheetResponse,
};
use crate::domain::{DomainError, Role, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for clock mutations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockBody {
    /// Device-reported position; validated and gated, never stored.
    pub position: PositionPayload,
}

/// Open a shift session at the reported position.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-in",
    request_body = ClockBody,
    responses(
        (status = 200, description = "Session opened", body = ClockInResponse),
        (status = 400, description = "Invalid position", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorised", body = crate::domain::DomainError),
        (status = 403, description = "Outside the geofence", body = crate::domain::DomainError),
        (status = 404, description = "No anchor configured", body = crate::domain::DomainError),
        (status = 409, description = "A session is already open", body = crate::domain::DomainError)
    ),
    tags = ["attendance"],
    operation_id = "clockIn"
)]
#[post("/attendance/clock-in")]
pub async fn clock_in(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<ClockBody>,
) -> ApiResult<web::Json<ClockInResponse>> {
    let identity = session.require_identity()?;
    let response = state
        .attendance
        .clock_in(ClockInRequest {
            user_id: identity.user_id,
            position: payload.position,
        })
        .await?;
    Ok(web::Json(response))
}

/// Close the open shift session at the reported position.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-out",
    request_body = ClockBody,
    responses(
        (status = 200, description = "Session closed", body = ClockOutResponse),
        (status = 400, description = "Invalid position", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorised", body = crate::domain::DomainError),
        (status = 403, description = "Outside the geofence", body = crate::domain::DomainError),
        (status = 404, description = "No open session", body = crate::domain::DomainError)
    ),
    tags = ["attendance"],
    operation_id = "clockOut"
)]
#[post("/attendance/clock-out")]
pub async fn clock_out(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<ClockBody>,
) -> ApiResult<web::Json<ClockOutResponse>> {
    let identity = session.require_identity()?;
    let response = state
        .attendance
        .clock_out(ClockOutRequest {
            user_id: identity.user_id,
            position: payload.position,
        })
        .await?;
    Ok(web::Json(response))
}

/// Query parameters for timesheet reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetParams {
    /// Inclusive range start (RFC 3339).
    pub from: DateTime<Utc>,
    /// Exclusive range end (RFC 3339).
    pub to: DateTime<Utc>,
    /// Target user; managers only. Defaults to the session user.
    pub user_id: Option<String>,
}

/// Hours-worked summary over a date range.
///
/// Caretakers may only read their own timesheet; managers may name any user
/// via `userId`.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/timesheet",
    params(
        ("from" = String, Query, description = "Inclusive range start, RFC 3339"),
        ("to" = String, Query, description = "Exclusive range end, RFC 3339"),
        ("userId" = Option<String>, Query, description = "Target user (managers only)")
    ),
    responses(
        (status = 200, description = "Timesheet", body = TimesheetResponse),
        (status = 400, description = "Invalid range or user id", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorised", body = crate::domain::DomainError),
        (status = 403, description = "Not permitted for this user", body = crate::domain::DomainError)
    ),
    tags = ["attendance"],
    operation_id = "timesheet"
)]
#[get("/attendance/timesheet")]
pub async fn timesheet(
    session: SessionContext,
    state: web::Data<HttpState>,
    params: web::Query<TimesheetParams>,
) -> ApiResult<web::Json<TimesheetResponse>> {
    let identity = session.require_identity()?;
    let params = params.into_inner();

    let target = match params.user_id {
        None => identity.user_id,
        Some(raw) => {
            let requested = UserId::new(&raw).map_err(|err| {
                DomainError::invalid_request(format!("invalid userId parameter: {err}"))
            })?;
            if requested != identity.user_id && identity.role != Role::Manager {
                return Err(DomainError::forbidden(
                    "caretakers may only read their own timesheet",
                )
                .into());
            }
            requested
        }
    };

    let response = state
        .attendance_query
        .timesheet(TimesheetRequest {
            user_id: target,
            from: params.from,
            to: params.to,
        })
        .await?;
    Ok(web::Json(response))
}
