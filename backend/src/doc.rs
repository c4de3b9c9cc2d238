//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: all HTTP endpoints from the inbound layer, the shared
//! error envelope and payload schemas, and the session cookie security
//! scheme. The generated specification backs Swagger UI (debug builds) and
//! is exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shiftwatch backend API",
        description = "HTTP interface for geofenced shift attendance, role \
            reconciliation, and anchor administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::login::me,
        crate::inbound::http::login::logout,
        crate::inbound::http::attendance::clock_in,
        crate::inbound::http::attendance::clock_out,
        crate::inbound::http::attendance::timesheet,
        crate::inbound::http::anchor::get_anchor,
        crate::inbound::http::anchor::put_anchor,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::DomainError,
        crate::domain::ErrorCode,
        crate::domain::ReconciliationAction,
        crate::domain::ReconciliationOutcome,
        crate::domain::RoleSyncErrorKind,
        crate::domain::roles::Role,
        crate::domain::ports::AnchorPayload,
        crate::domain::ports::ClockInResponse,
        crate::domain::ports::ClockOutResponse,
        crate::domain::ports::GetAnchorResponse,
        crate::domain::ports::PositionPayload,
        crate::domain::ports::SetAnchorResponse,
        crate::domain::ports::TimesheetEntryPayload,
        crate::domain::ports::TimesheetResponse,
        crate::inbound::http::anchor::PutAnchorBody,
        crate::inbound::http::attendance::ClockBody,
        crate::inbound::http::login::LoginRequest,
        crate::inbound::http::login::LoginResponse,
        crate::inbound::http::login::MeResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_lists_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/v1/login",
            "/api/v1/me",
            "/api/v1/logout",
            "/api/v1/attendance/clock-in",
            "/api/v1/attendance/clock-out",
            "/api/v1/attendance/timesheet",
            "/api/v1/anchor",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }

    #[test]
    fn document_registers_the_session_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
