//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! identity provider. This makes HTTP handler tests deterministic because
//! they can substitute a test double instead of wiring a live provider.

use async_trait::async_trait;

use crate::domain::{DomainError, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, DomainError>;
}

/// In-memory authenticator used in development and handler tests.
///
/// `manager` / `password` and `caretaker` / `password` authenticate
/// successfully and produce fixed user ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// Fixed user id produced for the fixture manager account.
pub const FIXTURE_MANAGER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
/// Fixed user id produced for the fixture caretaker account.
pub const FIXTURE_CARETAKER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, DomainError> {
        let fixture_id = match (credentials.username(), credentials.password()) {
            ("manager", "password") => FIXTURE_MANAGER_ID,
            ("caretaker", "password") => FIXTURE_CARETAKER_ID,
            _ => return Err(DomainError::unauthorized("invalid credentials")),
        };
        UserId::new(fixture_id)
            .map_err(|err| DomainError::internal(format!("invalid fixture user id: {err}")))
    }
}
