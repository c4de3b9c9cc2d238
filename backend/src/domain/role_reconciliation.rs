//! Reconciliation between the local role record and the identity provider.
//!
//! The local role is authoritative. Reconciliation compares it against the
//! provider's ordered role list for the user and either does nothing, pushes
//! the local role outward, or reports a typed failure. It performs at most
//! one remote mutation per call and never retries: retry and timeout policy
//! belong to the directory adapter underneath.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ports::{RoleDirectory, RoleDirectoryError};
use super::{DomainError, RemoteRole, Role, RoleAssignment};

/// Corrective action taken by a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconciliationAction {
    /// Local and remote already agree.
    None,
    /// The local role was pushed to the identity provider.
    Pushed,
    /// Reconciliation could not bring the two sides into agreement.
    Failed,
}

/// Why a reconciliation pass failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleSyncErrorKind {
    /// No remote role object matches the local role name; neither side is
    /// guessed to be right.
    RoleNotFoundRemote,
    /// The remote role list is empty; the user needs onboarding.
    NoRolesAssigned,
    /// The push to the identity provider failed; not retried here.
    RemoteUpdateFailed,
}

/// Outcome of one reconciliation pass.
///
/// Business failures are values, not errors: the caller decides whether to
/// surface them, redirect to onboarding, or log and move on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutcome {
    /// Action taken.
    pub action: ReconciliationAction,
    /// The role both sides agree on after the pass; absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resulting_role: Option<Role>,
    /// Failure classification when `action` is `FAILED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<RoleSyncErrorKind>,
}

impl ReconciliationOutcome {
    /// Outcome for a pass that found local and remote in agreement.
    pub fn synced(role: Role) -> Self {
        Self {
            action: ReconciliationAction::None,
            resulting_role: Some(role),
            error_kind: None,
        }
    }

    /// Outcome for a pass that pushed the local role outward.
    pub fn pushed(role: Role) -> Self {
        Self {
            action: ReconciliationAction::Pushed,
            resulting_role: Some(role),
            error_kind: None,
        }
    }

    /// Outcome for a failed pass.
    pub fn failed(kind: RoleSyncErrorKind) -> Self {
        Self {
            action: ReconciliationAction::Failed,
            resulting_role: None,
            error_kind: Some(kind),
        }
    }
}

/// Stateless reconciler implementing the drift-resolution policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleReconciler;

impl RoleReconciler {
    /// Reconcile one user's local role against their remote role list.
    ///
    /// Only the first remote entry is authoritative; later entries are
    /// ignored even when one of them matches the local role. On drift the
    /// matching remote role object is assigned to the user — exactly once,
    /// with no retry on failure.
    ///
    /// Directory failures while *reading* (the role-object lookup) propagate
    /// as `service_unavailable`; a failed *push* is reported as a
    /// `REMOTE_UPDATE_FAILED` outcome instead.
    pub async fn reconcile<D>(
        &self,
        local: &RoleAssignment,
        remote_roles: &[RemoteRole],
        directory: &D,
    ) -> Result<ReconciliationOutcome, DomainError>
    where
        D: RoleDirectory + ?Sized,
    {
        let Some(authoritative) = remote_roles.first() else {
            tracing::info!(user_id = %local.user_id, "user has no remote roles");
            return Ok(ReconciliationOutcome::failed(
                RoleSyncErrorKind::NoRolesAssigned,
            ));
        };

        if local.role.matches_name(&authoritative.name) {
            return Ok(ReconciliationOutcome::synced(local.role));
        }

        tracing::info!(
            user_id = %local.user_id,
            local_role = %local.role,
            remote_role = %authoritative.name,
            "role drift detected, pushing local role to the identity provider"
        );

        let target = self
            .resolve_remote_role(local, directory)
            .await?;
        let Some(target) = target else {
            return Ok(ReconciliationOutcome::failed(
                RoleSyncErrorKind::RoleNotFoundRemote,
            ));
        };

        match directory.assign_role(&target.id, &local.user_id).await {
            Ok(()) => Ok(ReconciliationOutcome::pushed(local.role)),
            Err(err) => {
                tracing::warn!(
                    user_id = %local.user_id,
                    error = %err,
                    "pushing local role to the identity provider failed"
                );
                Ok(ReconciliationOutcome::failed(
                    RoleSyncErrorKind::RemoteUpdateFailed,
                ))
            }
        }
    }

    async fn resolve_remote_role<D>(
        &self,
        local: &RoleAssignment,
        directory: &D,
    ) -> Result<Option<RemoteRole>, DomainError>
    where
        D: RoleDirectory + ?Sized,
    {
        directory
            .find_role_by_name(local.role.name())
            .await
            .map_err(map_directory_read_error)
    }
}

fn map_directory_read_error(error: RoleDirectoryError) -> DomainError {
    DomainError::service_unavailable(format!("role directory unavailable: {error}"))
}
