//! Anchor administration API handlers.
//!
//! ```text
//! GET /api/v1/anchor
//! PUT /api/v1/anchor {"latitude":..,"longitude":..,"radiusKm":..}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AnchorPayload, GetAnchorResponse, SetAnchorRequest, SetAnchorResponse,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for anchor replacement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PutAnchorBody {
    /// Latitude of the geofence centre in decimal degrees.
    pub latitude: f64,
    /// Longitude of the geofence centre in decimal degrees.
    pub longitude: f64,
    /// Geofence radius in kilometres.
    pub radius_km: f64,
}

/// Read the organisation's anchor.
#[utoipa::path(
    get,
    path = "/api/v1/anchor",
    responses(
        (status = 200, description = "Configured anchor, if any", body = GetAnchorResponse),
        (status = 401, description = "Unauthorised", body = crate::domain::DomainError)
    ),
    tags = ["anchor"],
    operation_id = "getAnchor"
)]
#[get("/anchor")]
pub async fn get_anchor(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<GetAnchorResponse>> {
    session.require_identity()?;
    let response = state.anchor_query.get_anchor().await?;
    Ok(web::Json(response))
}

/// Replace the organisation's anchor. Manager-only.
#[utoipa::path(
    put,
    path = "/api/v1/anchor",
    request_body = PutAnchorBody,
    responses(
        (status = 200, description = "Anchor stored", body = SetAnchorResponse),
        (status = 400, description = "Invalid anchor values", body = crate::domain::DomainError),
        (status = 401, description = "Unauthorised", body = crate::domain::DomainError),
        (status = 403, description = "Manager role required", body = crate::domain::DomainError)
    ),
    tags = ["anchor"],
    operation_id = "putAnchor"
)]
#[put("/anchor")]
pub async fn put_anchor(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<PutAnchorBody>,
) -> ApiResult<web::Json<SetAnchorResponse>> {
    let identity = session.require_identity()?;
    let body = payload.into_inner();
    let response = state
        .anchor
        .set_anchor(SetAnchorRequest {
            actor_role: identity.role,
            anchor: AnchorPayload {
                latitude: body.latitude,
                longitude: body.longitude,
                radius_km: body.radius_km,
            },
        })
        .await?;
    Ok(web::Json(response))
}
