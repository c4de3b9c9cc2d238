//! Driving port for role reconciliation use-cases.
//!
//! Runs at login and during onboarding. The caller supplies only the user
//! id; the implementation loads the local record, fetches the remote role
//! list, and reports a [`ReconciliationOutcome`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, ReconciliationOutcome, Role, UserId};

/// Request to reconcile one user's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRoleRequest {
    /// User whose role should be reconciled.
    pub user_id: UserId,
}

/// Response from a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncRoleResponse {
    /// What the pass decided and did.
    pub outcome: ReconciliationOutcome,
}

/// Driving port for role reconciliation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleSyncCommand: Send + Sync {
    /// Reconcile the user's local role against the identity provider.
    ///
    /// Fails with `not_found` when no local role record exists; creating
    /// users is the caller's job, never the reconciler's.
    async fn sync_role(&self, request: SyncRoleRequest) -> Result<SyncRoleResponse, DomainError>;
}

/// Fixture command reporting every user as already synced to caretaker.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoleSyncCommand;

#[async_trait]
impl RoleSyncCommand for FixtureRoleSyncCommand {
    async fn sync_role(&self, _request: SyncRoleRequest) -> Result<SyncRoleResponse, DomainError> {
        Ok(SyncRoleResponse {
            outcome: ReconciliationOutcome::synced(Role::Caretaker),
        })
    }
}
