//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnchorCommand, AnchorQuery, AttendanceCommand, AttendanceQuery, FixtureAnchorCommand,
    FixtureAnchorQuery, FixtureAttendanceCommand, FixtureAttendanceQuery, FixtureLoginService,
    FixtureRoleSyncCommand, LoginService, RoleSyncCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Role reconciliation use-case.
    pub role_sync: Arc<dyn RoleSyncCommand>,
    /// Clock-in/out use-case.
    pub attendance: Arc<dyn AttendanceCommand>,
    /// Timesheet use-case.
    pub attendance_query: Arc<dyn AttendanceQuery>,
    /// Anchor mutation use-case.
    pub anchor: Arc<dyn AnchorCommand>,
    /// Anchor read use-case.
    pub anchor_query: Arc<dyn AnchorQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            role_sync: Arc::new(FixtureRoleSyncCommand),
            attendance: Arc::new(FixtureAttendanceCommand),
            attendance_query: Arc::new(FixtureAttendanceQuery),
            anchor: Arc::new(FixtureAnchorCommand),
            anchor_query: Arc::new(FixtureAnchorQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Role reconciliation use-case.
    pub role_sync: Arc<dyn RoleSyncCommand>,
    /// Clock-in/out use-case.
    pub attendance: Arc<dyn AttendanceCommand>,
    /// Timesheet use-case.
    pub attendance_query: Arc<dyn AttendanceQuery>,
    /// Anchor mutation use-case.
    pub anchor: Arc<dyn AnchorCommand>,
    /// Anchor read use-case.
    pub anchor_query: Arc<dyn AnchorQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::default());
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            role_sync,
            attendance,
            attendance_query,
            anchor,
            anchor_query,
        } = ports;
        Self {
            login,
            role_sync,
            attendance,
            attendance_query,
            anchor,
            anchor_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
