//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed domain entities and the use-case services
//! operating on them. Types stay immutable where possible and document their
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//! Transport and persistence concerns live in the inbound/outbound adapters.

pub mod anchor_service;
pub mod attendance_service;
pub mod auth;
pub mod error;
pub mod geofence;
pub mod ports;
pub mod role_reconciliation;
pub mod role_sync_service;
pub mod roles;
pub mod shift;
pub mod user;

pub use self::anchor_service::AnchorAdminService;
pub use self::attendance_service::{AttendanceCommandService, AttendanceQueryService};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::geofence::{
    AnchorLocation, EARTH_RADIUS_KM, GeoPoint, GeofenceValidationError, haversine_distance_km,
};
pub use self::role_reconciliation::{
    ReconciliationAction, ReconciliationOutcome, RoleReconciler, RoleSyncErrorKind,
};
pub use self::role_sync_service::RoleSyncService;
pub use self::roles::{RemoteRole, RemoteRoleId, Role, RoleAssignment, UnknownRoleError};
pub use self::shift::{
    ShiftSession, ShiftValidationError, TimesheetEntry, TimesheetSummary,
};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient domain result alias.
pub type DomainResult<T> = Result<T, DomainError>;
