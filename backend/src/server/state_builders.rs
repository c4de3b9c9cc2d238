//! Builders assembling the HTTP state from configured adapters.
//!
//! Each port gets the Diesel- or HTTP-backed implementation when its
//! collaborator is configured and an in-memory / fixture fallback otherwise,
//! so a bare `cargo run` produces a working development server.

use std::sync::Arc;

use mockable::DefaultClock;

use backend::domain::ports::{
    AnchorRepository, AttendanceRepository, FIXTURE_CARETAKER_ID, FIXTURE_MANAGER_ID,
    FixtureLoginService, FixtureRoleDirectory, RoleAssignmentRepository, RoleDirectory,
};
use backend::domain::{
    AnchorAdminService, AttendanceCommandService, AttendanceQueryService, Role, RoleAssignment,
    RoleSyncService, UserId,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DieselAnchorRepository, DieselAttendanceRepository, DieselRoleAssignmentRepository,
    MemoryAnchorRepository, MemoryAttendanceRepository, MemoryRoleAssignmentRepository,
};

use super::ServerConfig;

fn fixture_assignments() -> Vec<RoleAssignment> {
    [
        (FIXTURE_MANAGER_ID, Role::Manager),
        (FIXTURE_CARETAKER_ID, Role::Caretaker),
    ]
    .into_iter()
    .filter_map(|(raw_id, role)| {
        UserId::new(raw_id)
            .ok()
            .map(|user_id| RoleAssignment::new(user_id, role))
    })
    .collect()
}

/// Build the HTTP state from the server configuration.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let (role_repo, attendance_repo, anchor_repo): (
        Arc<dyn RoleAssignmentRepository>,
        Arc<dyn AttendanceRepository>,
        Arc<dyn AnchorRepository>,
    ) = match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselRoleAssignmentRepository::new(pool.clone())),
            Arc::new(DieselAttendanceRepository::new(pool.clone())),
            Arc::new(DieselAnchorRepository::new(pool.clone())),
        ),
        None => (
            // Seed the fixture accounts so login works against the memory store.
            Arc::new(MemoryRoleAssignmentRepository::with_assignments(
                fixture_assignments(),
            )),
            Arc::new(MemoryAttendanceRepository::new()),
            Arc::new(MemoryAnchorRepository::new()),
        ),
    };

    let role_directory: Arc<dyn RoleDirectory> = match &config.role_directory {
        Some(directory) => directory.clone(),
        None => Arc::new(FixtureRoleDirectory),
    };

    let anchor_admin = Arc::new(AnchorAdminService::new(anchor_repo.clone()));

    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        role_sync: Arc::new(RoleSyncService::new(role_directory, role_repo)),
        attendance: Arc::new(AttendanceCommandService::new(
            attendance_repo.clone(),
            anchor_repo,
            Arc::new(DefaultClock),
        )),
        attendance_query: Arc::new(AttendanceQueryService::new(attendance_repo)),
        anchor: anchor_admin.clone(),
        anchor_query: anchor_admin,
    })
}
