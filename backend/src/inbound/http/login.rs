//! Login API handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"caretaker","password":"password"}
//! GET /api/v1/me
//! ```
//!
//! Login authenticates against the identity provider, then reconciles the
//! user's role before a session is established. When reconciliation fails
//! the outcome is returned without a session so the client can route the
//! user to onboarding or support.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::SyncRoleRequest;
use crate::domain::{
    DomainError, LoginCredentials, LoginValidationError, ReconciliationOutcome, Role, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{SessionContext, SessionIdentity};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username forwarded to the identity provider.
    pub username: String,
    /// Password forwarded to the identity provider.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Login response carrying the reconciliation outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Authenticated user.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    /// What role reconciliation decided and did.
    pub outcome: ReconciliationOutcome,
}

/// Authenticate, reconcile the user's role, and establish a session.
///
/// The session is only established when reconciliation yields an agreed
/// role; a `FAILED` outcome is returned as data for the client to act on.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login processed; check the outcome", body = LoginResponse),
        (status = 400, description = "Invalid request", body = crate::domain::DomainError),
        (status = 401, description = "Invalid credentials", body = crate::domain::DomainError),
        (status = 404, description = "No local role record", body = crate::domain::DomainError),
        (status = 503, description = "Identity provider unavailable", body = crate::domain::DomainError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;

    let sync = state
        .role_sync
        .sync_role(SyncRoleRequest {
            user_id: user_id.clone(),
        })
        .await?;

    if let Some(role) = sync.outcome.resulting_role {
        session.persist_identity(&SessionIdentity {
            user_id: user_id.clone(),
            role,
        })?;
    } else {
        tracing::info!(user_id = %user_id, "login without a session: role reconciliation failed");
    }

    Ok(web::Json(LoginResponse {
        user_id,
        outcome: sync.outcome,
    }))
}

fn map_login_validation_error(err: LoginValidationError) -> DomainError {
    match err {
        LoginValidationError::EmptyUsername => DomainError::invalid_request(
            "username must not be empty",
        )
        .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => DomainError::invalid_request(
            "password must not be empty",
        )
        .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Identity payload for `GET /api/v1/me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Authenticated user.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    /// Role stored in the session.
    pub role: Role,
}

/// Return the authenticated identity stored in the session.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated identity", body = MeResponse),
        (status = 401, description = "Unauthorised", body = crate::domain::DomainError)
    ),
    tags = ["auth"],
    operation_id = "me"
)]
#[get("/me")]
pub async fn me(session: SessionContext) -> ApiResult<web::Json<MeResponse>> {
    let identity = session.require_identity()?;
    Ok(web::Json(MeResponse {
        user_id: identity.user_id,
        role: identity.role,
    }))
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}
