//! Anchor administration domain service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    AnchorCommand, AnchorPayload, AnchorQuery, AnchorRepository, AnchorRepositoryError,
    GetAnchorResponse, SetAnchorRequest, SetAnchorResponse,
};
use crate::domain::{AnchorLocation, DomainError, Role};

fn map_anchor_error(error: AnchorRepositoryError) -> DomainError {
    match error {
        AnchorRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("anchor store unavailable: {message}"))
        }
        AnchorRepositoryError::Query { message } => {
            DomainError::internal(format!("anchor store error: {message}"))
        }
    }
}

/// Anchor administration service implementing both driving ports.
pub struct AnchorAdminService<G: ?Sized> {
    anchor_repo: Arc<G>,
}

impl<G: ?Sized> AnchorAdminService<G> {
    /// Create a new service over the anchor repository.
    pub fn new(anchor_repo: Arc<G>) -> Self {
        Self { anchor_repo }
    }
}

#[async_trait]
impl<G> AnchorCommand for AnchorAdminService<G>
where
    G: AnchorRepository + ?Sized,
{
    async fn set_anchor(
        &self,
        request: SetAnchorRequest,
    ) -> Result<SetAnchorResponse, DomainError> {
        if request.actor_role != Role::Manager {
            return Err(DomainError::forbidden("only managers may set the anchor"));
        }

        let anchor = AnchorLocation::try_from(request.anchor).map_err(|err| {
            DomainError::invalid_request(format!("invalid anchor: {err}"))
                .with_details(json!({ "code": "invalid_coordinate" }))
        })?;

        self.anchor_repo
            .set(&anchor)
            .await
            .map_err(map_anchor_error)?;

        Ok(SetAnchorResponse {
            anchor: AnchorPayload::from(anchor),
        })
    }
}

#[async_trait]
impl<G> AnchorQuery for AnchorAdminService<G>
where
    G: AnchorRepository + ?Sized,
{
    async fn get_anchor(&self) -> Result<GetAnchorResponse, DomainError> {
        let anchor = self.anchor_repo.get().await.map_err(map_anchor_error)?;
        Ok(GetAnchorResponse {
            anchor: anchor.map(AnchorPayload::from),
        })
    }
}
