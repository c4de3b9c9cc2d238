//! Port for the locally persisted user-role records.

use async_trait::async_trait;

use crate::domain::{RoleAssignment, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by role assignment repository adapters.
    pub enum RoleAssignmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "role assignment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "role assignment repository query failed: {message}",
    }
}

/// Port for reading and writing the single role record per user.
///
/// Reads are assumed strongly consistent within one reconciliation call; an
/// adapter must not serve a stale cached record mid-call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Fetch the role record for `user_id`.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RoleAssignment>, RoleAssignmentRepositoryError>;

    /// Insert or replace the role record for the assignment's user.
    async fn upsert(
        &self,
        assignment: &RoleAssignment,
    ) -> Result<(), RoleAssignmentRepositoryError>;
}

/// Fixture repository for tests that do not exercise role persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoleAssignmentRepository;

#[async_trait]
impl RoleAssignmentRepository for FixtureRoleAssignmentRepository {
    async fn find_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<RoleAssignment>, RoleAssignmentRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        _assignment: &RoleAssignment,
    ) -> Result<(), RoleAssignmentRepositoryError> {
        Ok(())
    }
}
