//! Driven port for the external identity provider's role directory.
//!
//! Reconciliation reads a user's remote role list through this port and, on
//! drift, pushes the local role outward. The per-user list is fetched fresh
//! for every reconciliation pass and never cached across calls.

use async_trait::async_trait;

use crate::domain::{RemoteRole, RemoteRoleId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by role directory adapters.
    pub enum RoleDirectoryError {
        /// The identity provider could not be reached or timed out.
        Transport { message: String } =>
            "role directory unreachable: {message}",
        /// The identity provider answered with a non-success status.
        Rejected { message: String } =>
            "role directory rejected the request: {message}",
    }
}

/// Port for reading and mutating role assignments in the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Roles currently assigned to `user_id`, in provider order.
    ///
    /// An empty list is valid data, not an error.
    async fn list_roles_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RemoteRole>, RoleDirectoryError>;

    /// Look up the provider's role object whose name matches `name`
    /// case-insensitively.
    async fn find_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<RemoteRole>, RoleDirectoryError>;

    /// Assign the role identified by `role_id` to `user_id`.
    async fn assign_role(
        &self,
        role_id: &RemoteRoleId,
        user_id: &UserId,
    ) -> Result<(), RoleDirectoryError>;
}

/// Fixture directory for tests and database-less development runs.
///
/// Knows the two application roles and reports every user as carrying the
/// caretaker role remotely.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoleDirectory;

#[async_trait]
impl RoleDirectory for FixtureRoleDirectory {
    async fn list_roles_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<RemoteRole>, RoleDirectoryError> {
        Ok(vec![RemoteRole::new("rol_caretaker", "Caretaker")])
    }

    async fn find_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<RemoteRole>, RoleDirectoryError> {
        let known = [
            RemoteRole::new("rol_manager", "Manager"),
            RemoteRole::new("rol_caretaker", "Caretaker"),
        ];
        Ok(known
            .into_iter()
            .find(|role| role.name.eq_ignore_ascii_case(name)))
    }

    async fn assign_role(
        &self,
        _role_id: &RemoteRoleId,
        _user_id: &UserId,
    ) -> Result<(), RoleDirectoryError> {
        Ok(())
    }
}
