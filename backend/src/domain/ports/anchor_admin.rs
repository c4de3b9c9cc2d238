//! Driving ports for anchor location administration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AnchorLocation, DomainError, GeofenceValidationError, GeoPoint, Role};

/// Anchor payload exchanged with inbound adapters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPayload {
    /// Latitude of the geofence centre in decimal degrees.
    pub latitude: f64,
    /// Longitude of the geofence centre in decimal degrees.
    pub longitude: f64,
    /// Geofence radius in kilometres.
    pub radius_km: f64,
}

impl From<AnchorLocation> for AnchorPayload {
    fn from(value: AnchorLocation) -> Self {
        Self {
            latitude: value.center().latitude(),
            longitude: value.center().longitude(),
            radius_km: value.radius_km(),
        }
    }
}

impl TryFrom<AnchorPayload> for AnchorLocation {
    type Error = GeofenceValidationError;

    fn try_from(value: AnchorPayload) -> Result<Self, Self::Error> {
        let center = GeoPoint::new(value.latitude, value.longitude)?;
        AnchorLocation::new(center, value.radius_km)
    }
}

/// Request to replace the organisation's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAnchorRequest {
    /// Role of the acting user; only managers may mutate the anchor.
    pub actor_role: Role,
    /// New anchor values.
    pub anchor: AnchorPayload,
}

/// Response carrying the stored anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAnchorResponse {
    /// The anchor as stored.
    pub anchor: AnchorPayload,
}

/// Response for anchor reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAnchorResponse {
    /// The configured anchor, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorPayload>,
}

/// Driving port for anchor mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnchorCommand: Send + Sync {
    /// Replace the anchor. Manager-only.
    async fn set_anchor(&self, request: SetAnchorRequest)
    -> Result<SetAnchorResponse, DomainError>;
}

/// Driving port for anchor reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnchorQuery: Send + Sync {
    /// Fetch the configured anchor.
    async fn get_anchor(&self) -> Result<GetAnchorResponse, DomainError>;
}

/// Fixture command echoing the requested anchor without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnchorCommand;

#[async_trait]
impl AnchorCommand for FixtureAnchorCommand {
    async fn set_anchor(
        &self,
        request: SetAnchorRequest,
    ) -> Result<SetAnchorResponse, DomainError> {
        if request.actor_role != Role::Manager {
            return Err(DomainError::forbidden("only managers may set the anchor"));
        }
        Ok(SetAnchorResponse {
            anchor: request.anchor,
        })
    }
}

/// Fixture query reporting no configured anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnchorQuery;

#[async_trait]
impl AnchorQuery for FixtureAnchorQuery {
    async fn get_anchor(&self) -> Result<GetAnchorResponse, DomainError> {
        Ok(GetAnchorResponse { anchor: None })
    }
}
