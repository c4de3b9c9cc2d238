//! Attendance domain services.
//!
//! These services implement the attendance driving ports: geofence-gated
//! clock-in/clock-out mutations and timesheet reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    AnchorRepository, AnchorRepositoryError, AttendanceCommand, AttendanceQuery,
    AttendanceRepository, AttendanceRepositoryError, ClockInRequest, ClockInResponse,
    ClockOutRequest, ClockOutResponse, PositionPayload, TimesheetRequest, TimesheetResponse,
};
use crate::domain::{
    AnchorLocation, DomainError, GeoPoint, ShiftSession, TimesheetSummary, UserId,
};

fn map_attendance_error(error: AttendanceRepositoryError) -> DomainError {
    match error {
        AttendanceRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("attendance store unavailable: {message}"))
        }
        AttendanceRepositoryError::Query { message } => {
            DomainError::internal(format!("attendance store error: {message}"))
        }
    }
}

fn map_anchor_error(error: AnchorRepositoryError) -> DomainError {
    match error {
        AnchorRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("anchor store unavailable: {message}"))
        }
        AnchorRepositoryError::Query { message } => {
            DomainError::internal(format!("anchor store error: {message}"))
        }
    }
}

fn validate_position(position: PositionPayload) -> Result<GeoPoint, DomainError> {
    GeoPoint::new(position.latitude, position.longitude).map_err(|err| {
        DomainError::invalid_request(format!("invalid position: {err}"))
            .with_details(json!({ "code": "invalid_coordinate" }))
    })
}

/// Attendance service implementing the command driving port.
pub struct AttendanceCommandService<A: ?Sized, G: ?Sized> {
    attendance_repo: Arc<A>,
    anchor_repo: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<A, G> AttendanceCommandService<A, G>
where
    A: ?Sized,
    G: AnchorRepository + ?Sized,
{
    /// Create a new command service.
    pub fn new(attendance_repo: Arc<A>, anchor_repo: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            attendance_repo,
            anchor_repo,
            clock,
        }
    }

    /// Load the anchor and gate `position` against it.
    async fn require_within_anchor(
        &self,
        user_id: &UserId,
        position: GeoPoint,
    ) -> Result<AnchorLocation, DomainError> {
        let anchor = self
            .anchor_repo
            .get()
            .await
            .map_err(map_anchor_error)?
            .ok_or_else(|| DomainError::not_found("no anchor location is configured"))?;

        if !anchor.contains(&position) {
            tracing::info!(user_id = %user_id, "clock attempt outside the geofence");
            return Err(DomainError::forbidden(
                "position is outside the attendance geofence",
            ));
        }
        Ok(anchor)
    }
}

#[async_trait]
impl<A, G> AttendanceCommand for AttendanceCommandService<A, G>
where
    A: AttendanceRepository + ?Sized,
    G: AnchorRepository + ?Sized,
{
    async fn clock_in(&self, request: ClockInRequest) -> Result<ClockInResponse, DomainError> {
        let position = validate_position(request.position)?;
        self.require_within_anchor(&request.user_id, position)
            .await?;

        if let Some(open) = self
            .attendance_repo
            .find_open_for_user(&request.user_id)
            .await
            .map_err(map_attendance_error)?
        {
            return Err(DomainError::conflict("a shift session is already open")
                .with_details(json!({ "sessionId": open.id() })));
        }

        let session = ShiftSession::open(request.user_id, self.clock.utc());
        self.attendance_repo
            .insert(&session)
            .await
            .map_err(map_attendance_error)?;

        Ok(ClockInResponse {
            session_id: session.id(),
            clock_in_at: session.clock_in_at(),
        })
    }

    async fn clock_out(&self, request: ClockOutRequest) -> Result<ClockOutResponse, DomainError> {
        let position = validate_position(request.position)?;
        self.require_within_anchor(&request.user_id, position)
            .await?;

        let mut session = self
            .attendance_repo
            .find_open_for_user(&request.user_id)
            .await
            .map_err(map_attendance_error)?
            .ok_or_else(|| DomainError::not_found("no open shift session to close"))?;

        session
            .close(self.clock.utc())
            .map_err(|err| DomainError::internal(format!("failed to close session: {err}")))?;
        self.attendance_repo
            .update(&session)
            .await
            .map_err(map_attendance_error)?;

        let clock_out_at = session
            .clock_out_at()
            .ok_or_else(|| DomainError::internal("closed session is missing its clock-out"))?;
        let worked_minutes = session
            .worked_minutes()
            .map_err(|err| DomainError::internal(format!("failed to total session: {err}")))?;

        Ok(ClockOutResponse {
            session_id: session.id(),
            clock_in_at: session.clock_in_at(),
            clock_out_at,
            worked_minutes,
        })
    }
}

/// Attendance service implementing the query driving port.
pub struct AttendanceQueryService<A: ?Sized> {
    attendance_repo: Arc<A>,
}

impl<A: ?Sized> AttendanceQueryService<A> {
    /// Create a new query service.
    pub fn new(attendance_repo: Arc<A>) -> Self {
        Self { attendance_repo }
    }
}

#[async_trait]
impl<A> AttendanceQuery for AttendanceQueryService<A>
where
    A: AttendanceRepository + ?Sized,
{
    async fn timesheet(
        &self,
        request: TimesheetRequest,
    ) -> Result<TimesheetResponse, DomainError> {
        if request.from > request.to {
            return Err(DomainError::invalid_request(
                "timesheet range start must not be after its end",
            ));
        }

        let sessions = self
            .attendance_repo
            .list_completed_between(&request.user_id, request.from, request.to)
            .await
            .map_err(map_attendance_error)?;

        let summary = TimesheetSummary::from_sessions(request.user_id, &sessions);
        Ok(summary.into())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockAnchorRepository, MockAttendanceRepository};
    use crate::domain::ErrorCode;

    fn fixed_clock(at: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().returning(move || at);
        Arc::new(clock)
    }

    #[fixture]
    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).single().expect("valid timestamp")
    }

    fn configured_anchor() -> MockAnchorRepository {
        let mut anchor_repo = MockAnchorRepository::new();
        anchor_repo.expect_get().returning(|| {
            let center = GeoPoint::new(0.0, 0.0).expect("valid centre");
            Ok(Some(
                AnchorLocation::new(center, 111.195).expect("valid anchor"),
            ))
        });
        anchor_repo
    }

    fn inside_position() -> PositionPayload {
        PositionPayload {
            latitude: 1.0,
            longitude: 0.0,
        }
    }

    fn outside_position() -> PositionPayload {
        PositionPayload {
            latitude: 2.0,
            longitude: 0.0,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn clock_in_inside_the_geofence_opens_a_session(nine_am: DateTime<Utc>) {
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_find_open_for_user()
            .returning(|_| Ok(None));
        attendance_repo
            .expect_insert()
            .times(1)
            .returning(|_| Ok(()));

        let service = AttendanceCommandService::new(
            Arc::new(attendance_repo),
            Arc::new(configured_anchor()),
            fixed_clock(nine_am),
        );

        let response = service
            .clock_in(ClockInRequest {
                user_id: UserId::random(),
                position: inside_position(),
            })
            .await
            .expect("clock-in succeeds");

        assert_eq!(response.clock_in_at, nine_am);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_in_outside_the_geofence_is_forbidden(nine_am: DateTime<Utc>) {
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo.expect_insert().never();

        let service = AttendanceCommandService::new(
            Arc::new(attendance_repo),
            Arc::new(configured_anchor()),
            fixed_clock(nine_am),
        );

        let err = service
            .clock_in(ClockInRequest {
                user_id: UserId::random(),
                position: outside_position(),
            })
            .await
            .expect_err("outside position must fail");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_in_with_invalid_coordinates_is_rejected(nine_am: DateTime<Utc>) {
        let service = AttendanceCommandService::new(
            Arc::new(MockAttendanceRepository::new()),
            Arc::new(MockAnchorRepository::new()),
            fixed_clock(nine_am),
        );

        let err = service
            .clock_in(ClockInRequest {
                user_id: UserId::random(),
                position: PositionPayload {
                    latitude: 95.0,
                    longitude: 0.0,
                },
            })
            .await
            .expect_err("invalid coordinate must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_in_without_an_anchor_is_not_found(nine_am: DateTime<Utc>) {
        let mut anchor_repo = MockAnchorRepository::new();
        anchor_repo.expect_get().returning(|| Ok(None));

        let service = AttendanceCommandService::new(
            Arc::new(MockAttendanceRepository::new()),
            Arc::new(anchor_repo),
            fixed_clock(nine_am),
        );

        let err = service
            .clock_in(ClockInRequest {
                user_id: UserId::random(),
                position: inside_position(),
            })
            .await
            .expect_err("missing anchor must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_in_with_an_open_session_conflicts(nine_am: DateTime<Utc>) {
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo.expect_find_open_for_user().returning(move |user_id| {
            Ok(Some(ShiftSession::open(user_id.clone(), nine_am)))
        });
        attendance_repo.expect_insert().never();

        let service = AttendanceCommandService::new(
            Arc::new(attendance_repo),
            Arc::new(configured_anchor()),
            fixed_clock(nine_am),
        );

        let err = service
            .clock_in(ClockInRequest {
                user_id: UserId::random(),
                position: inside_position(),
            })
            .await
            .expect_err("open session must conflict");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_out_closes_the_open_session(nine_am: DateTime<Utc>) {
        let clock_out_at = nine_am + chrono::Duration::minutes(480);
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo.expect_find_open_for_user().returning(move |user_id| {
            Ok(Some(ShiftSession::open(user_id.clone(), nine_am)))
        });
        attendance_repo
            .expect_update()
            .times(1)
            .returning(|_| Ok(()));

        let service = AttendanceCommandService::new(
            Arc::new(attendance_repo),
            Arc::new(configured_anchor()),
            fixed_clock(clock_out_at),
        );

        let response = service
            .clock_out(ClockOutRequest {
                user_id: UserId::random(),
                position: inside_position(),
            })
            .await
            .expect("clock-out succeeds");

        assert_eq!(response.worked_minutes, 480);
        assert_eq!(response.clock_out_at, clock_out_at);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_out_without_an_open_session_is_not_found(nine_am: DateTime<Utc>) {
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_find_open_for_user()
            .returning(|_| Ok(None));
        attendance_repo.expect_update().never();

        let service = AttendanceCommandService::new(
            Arc::new(attendance_repo),
            Arc::new(configured_anchor()),
            fixed_clock(nine_am),
        );

        let err = service
            .clock_out(ClockOutRequest {
                user_id: UserId::random(),
                position: inside_position(),
            })
            .await
            .expect_err("no open session must fail");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn clock_out_outside_the_geofence_is_forbidden(nine_am: DateTime<Utc>) {
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo.expect_update().never();

        let service = AttendanceCommandService::new(
            Arc::new(attendance_repo),
            Arc::new(configured_anchor()),
            fixed_clock(nine_am),
        );

        let err = service
            .clock_out(ClockOutRequest {
                user_id: UserId::random(),
                position: outside_position(),
            })
            .await
            .expect_err("outside position must fail");

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn timesheet_sums_completed_sessions(nine_am: DateTime<Utc>) {
        let user = UserId::random();
        let sessions_user = user.clone();
        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_list_completed_between()
            .times(1)
            .returning(move |_, _, _| {
                let mut first = ShiftSession::open(sessions_user.clone(), nine_am);
                first
                    .close(nine_am + chrono::Duration::minutes(120))
                    .expect("closes");
                let mut second = ShiftSession::open(
                    sessions_user.clone(),
                    nine_am + chrono::Duration::days(1),
                );
                second
                    .close(nine_am + chrono::Duration::days(1) + chrono::Duration::minutes(45))
                    .expect("closes");
                Ok(vec![first, second])
            });

        let service = AttendanceQueryService::new(Arc::new(attendance_repo));
        let response = service
            .timesheet(TimesheetRequest {
                user_id: user,
                from: nine_am - chrono::Duration::days(1),
                to: nine_am + chrono::Duration::days(7),
            })
            .await
            .expect("timesheet succeeds");

        assert_eq!(response.entries.len(), 2);
        assert_eq!(response.total_minutes, 165);
    }

    #[rstest]
    #[tokio::test]
    async fn inverted_timesheet_range_is_rejected(nine_am: DateTime<Utc>) {
        let service = AttendanceQueryService::new(Arc::new(MockAttendanceRepository::new()));
        let err = service
            .timesheet(TimesheetRequest {
                user_id: UserId::random(),
                from: nine_am,
                to: nine_am - chrono::Duration::days(1),
            })
            .await
            .expect_err("inverted range must fail");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
