//! End-to-end HTTP flows over the in-memory adapters.
//!
//! Covers the full staffing day: a manager logs in (role pushed to the
//! identity provider), configures the anchor, a caretaker logs in (already
//! synced), clocks in and out inside the geofence, and both read the
//! resulting timesheet.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use backend::domain::ports::{
    FIXTURE_CARETAKER_ID, FIXTURE_MANAGER_ID, FixtureLoginService, FixtureRoleDirectory,
};
use backend::domain::{
    AnchorAdminService, AttendanceCommandService, AttendanceQueryService, Role, RoleAssignment,
    RoleSyncService, UserId,
};
use backend::inbound::http::anchor::{get_anchor, put_anchor};
use backend::inbound::http::attendance::{clock_in, clock_out, timesheet};
use backend::inbound::http::login::{login, me};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    MemoryAnchorRepository, MemoryAttendanceRepository, MemoryRoleAssignmentRepository,
};

struct SequenceClock {
    times: Vec<DateTime<Utc>>,
    next: AtomicUsize,
}

impl SequenceClock {
    fn new(times: Vec<DateTime<Utc>>) -> Self {
        Self {
            times,
            next: AtomicUsize::new(0),
        }
    }
}

impl Clock for SequenceClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.utc().with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.times[index.min(self.times.len() - 1)]
    }
}

fn nine_am() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).single().expect("valid timestamp")
}

fn build_state(clock: Arc<dyn Clock>) -> HttpState {
    let role_repo = Arc::new(MemoryRoleAssignmentRepository::with_assignments([
        RoleAssignment::new(
            UserId::new(FIXTURE_MANAGER_ID).expect("fixture id"),
            Role::Manager,
        ),
        RoleAssignment::new(
            UserId::new(FIXTURE_CARETAKER_ID).expect("fixture id"),
            Role::Caretaker,
        ),
    ]));
    let attendance_repo = Arc::new(MemoryAttendanceRepository::new());
    let anchor_repo = Arc::new(MemoryAnchorRepository::new());
    let anchor_admin = Arc::new(AnchorAdminService::new(anchor_repo.clone()));

    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        role_sync: Arc::new(RoleSyncService::new(
            Arc::new(FixtureRoleDirectory),
            role_repo,
        )),
        attendance: Arc::new(AttendanceCommandService::new(
            attendance_repo.clone(),
            anchor_repo,
            clock,
        )),
        attendance_query: Arc::new(AttendanceQueryService::new(attendance_repo)),
        anchor: anchor_admin.clone(),
        anchor_query: anchor_admin,
    })
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(session_middleware())
                .service(
                    web::scope("/api/v1")
                        .service(login)
                        .service(me)
                        .service(clock_in)
                        .service(clock_out)
                        .service(timesheet)
                        .service(get_anchor)
                        .service(put_anchor),
                ),
        )
        .await
    };
}

async fn login_as(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    username: &str,
) -> (Cookie<'static>, Value) {
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": username, "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login must succeed");
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie");
    let body: Value = test::read_body_json(response).await;
    (cookie, body)
}

#[actix_web::test]
async fn a_full_staffing_day_round_trips() {
    let clock = Arc::new(SequenceClock::new(vec![
        nine_am(),
        nine_am() + chrono::Duration::minutes(480),
    ]));
    let app = test_app!(build_state(clock));

    // Manager logs in: local MANAGER vs remote first role Caretaker is
    // drift, so the local role gets pushed outward.
    let (manager_cookie, manager_login) = login_as(&app, "manager").await;
    assert_eq!(manager_login["outcome"]["action"], "PUSHED");
    assert_eq!(manager_login["outcome"]["resultingRole"], "MANAGER");

    // Manager configures the anchor: ~111.195 km around the origin.
    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/anchor")
            .cookie(manager_cookie.clone())
            .set_json(json!({ "latitude": 0.0, "longitude": 0.0, "radiusKm": 111.195 }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());

    // Caretaker logs in already synced.
    let (caretaker_cookie, caretaker_login) = login_as(&app, "caretaker").await;
    assert_eq!(caretaker_login["outcome"]["action"], "NONE");

    // Clock in one degree of latitude away: inside the fence.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/attendance/clock-in")
            .cookie(caretaker_cookie.clone())
            .set_json(json!({ "position": { "latitude": 1.0, "longitude": 0.0 } }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());

    // A second clock-in conflicts with the open session.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/attendance/clock-in")
            .cookie(caretaker_cookie.clone())
            .set_json(json!({ "position": { "latitude": 1.0, "longitude": 0.0 } }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);

    // Clocking out from two degrees away is outside the fence.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/attendance/clock-out")
            .cookie(caretaker_cookie.clone())
            .set_json(json!({ "position": { "latitude": 2.0, "longitude": 0.0 } }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);

    // Clocking out inside the fence closes the 8-hour session.
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/attendance/clock-out")
            .cookie(caretaker_cookie.clone())
            .set_json(json!({ "position": { "latitude": 1.0, "longitude": 0.0 } }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["workedMinutes"], 480);

    // The caretaker's own timesheet sums the day.
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/attendance/timesheet?from=2026-07-01T00:00:00Z&to=2026-07-02T00:00:00Z")
            .cookie(caretaker_cookie.clone())
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["totalMinutes"], 480);
    assert_eq!(body["entries"].as_array().expect("entries").len(), 1);

    // The manager may read the caretaker's timesheet by user id.
    let uri = format!(
        "/api/v1/attendance/timesheet?from=2026-07-01T00:00:00Z&to=2026-07-02T00:00:00Z&userId={FIXTURE_CARETAKER_ID}"
    );
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .cookie(manager_cookie.clone())
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["totalMinutes"], 480);

    // Any authenticated user may read the anchor back.
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/anchor")
            .cookie(caretaker_cookie)
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["anchor"]["radiusKm"], 111.195);
}

#[actix_web::test]
async fn clock_in_before_an_anchor_exists_is_not_found() {
    let clock = Arc::new(SequenceClock::new(vec![nine_am()]));
    let app = test_app!(build_state(clock));
    let (caretaker_cookie, _) = login_as(&app, "caretaker").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/attendance/clock-in")
            .cookie(caretaker_cookie)
            .set_json(json!({ "position": { "latitude": 1.0, "longitude": 0.0 } }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn users_without_remote_roles_get_the_onboarding_outcome() {
    struct EmptyDirectory;

    #[async_trait]
    impl backend::domain::ports::RoleDirectory for EmptyDirectory {
        async fn list_roles_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<backend::domain::RemoteRole>, backend::domain::ports::RoleDirectoryError>
        {
            Ok(Vec::new())
        }

        async fn find_role_by_name(
            &self,
            _name: &str,
        ) -> Result<Option<backend::domain::RemoteRole>, backend::domain::ports::RoleDirectoryError>
        {
            Ok(None)
        }

        async fn assign_role(
            &self,
            _role_id: &backend::domain::RemoteRoleId,
            _user_id: &UserId,
        ) -> Result<(), backend::domain::ports::RoleDirectoryError> {
            Ok(())
        }
    }

    let clock = Arc::new(SequenceClock::new(vec![nine_am()]));
    let mut state = build_state(clock);
    state.role_sync = Arc::new(RoleSyncService::new(
        Arc::new(EmptyDirectory),
        Arc::new(MemoryRoleAssignmentRepository::with_assignments([
            RoleAssignment::new(
                UserId::new(FIXTURE_CARETAKER_ID).expect("fixture id"),
                Role::Caretaker,
            ),
        ])),
    ));
    let app = test_app!(state);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "username": "caretaker", "password": "password" }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["outcome"]["action"], "FAILED");
    assert_eq!(body["outcome"]["errorKind"], "NO_ROLES_ASSIGNED");

    // No session was established, so /me is unauthorised.
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/me").to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}
