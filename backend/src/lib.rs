//! Shiftwatch backend: geofenced shift attendance with role reconciliation.
//!
//! The crate is laid out hexagonally: `domain` holds entities, services, and
//! ports; `inbound` exposes the REST adapter; `outbound` implements the
//! driven ports against PostgreSQL, process memory, and the identity
//! provider's HTTP API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
