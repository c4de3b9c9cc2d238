//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe how the domain talks to adapters (databases, the
//! identity provider); driving ports are the use-cases inbound adapters
//! call. Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod anchor_admin;
mod anchor_repository;
mod attendance_command;
mod attendance_query;
mod attendance_repository;
mod login_service;
mod role_assignment_repository;
mod role_directory;
mod role_sync_command;

#[cfg(test)]
pub use anchor_admin::{MockAnchorCommand, MockAnchorQuery};
pub use anchor_admin::{
    AnchorCommand, AnchorPayload, AnchorQuery, FixtureAnchorCommand, FixtureAnchorQuery,
    GetAnchorResponse, SetAnchorRequest, SetAnchorResponse,
};
#[cfg(test)]
pub use anchor_repository::MockAnchorRepository;
pub use anchor_repository::{AnchorRepository, AnchorRepositoryError, FixtureAnchorRepository};
#[cfg(test)]
pub use attendance_command::MockAttendanceCommand;
pub use attendance_command::{
    AttendanceCommand, ClockInRequest, ClockInResponse, ClockOutRequest, ClockOutResponse,
    FixtureAttendanceCommand, PositionPayload,
};
#[cfg(test)]
pub use attendance_query::MockAttendanceQuery;
pub use attendance_query::{
    AttendanceQuery, FixtureAttendanceQuery, TimesheetEntryPayload, TimesheetRequest,
    TimesheetResponse,
};
#[cfg(test)]
pub use attendance_repository::MockAttendanceRepository;
pub use attendance_repository::{
    AttendanceRepository, AttendanceRepositoryError, FixtureAttendanceRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_CARETAKER_ID, FIXTURE_MANAGER_ID, FixtureLoginService, LoginService,
};
#[cfg(test)]
pub use role_assignment_repository::MockRoleAssignmentRepository;
pub use role_assignment_repository::{
    FixtureRoleAssignmentRepository, RoleAssignmentRepository, RoleAssignmentRepositoryError,
};
#[cfg(test)]
pub use role_directory::MockRoleDirectory;
pub use role_directory::{FixtureRoleDirectory, RoleDirectory, RoleDirectoryError};
#[cfg(test)]
pub use role_sync_command::MockRoleSyncCommand;
pub use role_sync_command::{
    FixtureRoleSyncCommand, RoleSyncCommand, SyncRoleRequest, SyncRoleResponse,
};
