//! Role synchronisation domain service.
//!
//! Implements the [`RoleSyncCommand`] driving port: loads the local role
//! record, fetches the user's remote role list fresh from the identity
//! provider, and hands both to the [`RoleReconciler`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::ports::{
    RoleAssignmentRepository, RoleAssignmentRepositoryError, RoleDirectory, RoleDirectoryError,
    RoleSyncCommand, SyncRoleRequest, SyncRoleResponse,
};
use crate::domain::role_reconciliation::RoleReconciler;

fn map_repository_error(error: RoleAssignmentRepositoryError) -> DomainError {
    match error {
        RoleAssignmentRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("role store unavailable: {message}"))
        }
        RoleAssignmentRepositoryError::Query { message } => {
            DomainError::internal(format!("role store error: {message}"))
        }
    }
}

fn map_directory_error(error: RoleDirectoryError) -> DomainError {
    DomainError::service_unavailable(format!("role directory unavailable: {error}"))
}

/// Role sync service wiring the reconciler to its ports.
pub struct RoleSyncService<D: ?Sized, R: ?Sized> {
    directory: Arc<D>,
    role_repo: Arc<R>,
    reconciler: RoleReconciler,
}

impl<D: ?Sized, R: ?Sized> RoleSyncService<D, R> {
    /// Create a new service over the directory and the local role store.
    pub fn new(directory: Arc<D>, role_repo: Arc<R>) -> Self {
        Self {
            directory,
            role_repo,
            reconciler: RoleReconciler,
        }
    }
}

#[async_trait]
impl<D, R> RoleSyncCommand for RoleSyncService<D, R>
where
    D: RoleDirectory + ?Sized,
    R: RoleAssignmentRepository + ?Sized,
{
    async fn sync_role(&self, request: SyncRoleRequest) -> Result<SyncRoleResponse, DomainError> {
        let local = self
            .role_repo
            .find_by_user(&request.user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "no local role assignment for user {}; create the user first",
                    request.user_id
                ))
            })?;

        let remote_roles = self
            .directory
            .list_roles_for_user(&request.user_id)
            .await
            .map_err(map_directory_error)?;

        let outcome = self
            .reconciler
            .reconcile(&local, &remote_roles, self.directory.as_ref())
            .await?;

        Ok(SyncRoleResponse { outcome })
    }
}
