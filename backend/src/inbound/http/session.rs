//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the authenticated identity and
//! requiring it (or the manager role) back.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{DomainError, Role, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// The authenticated identity stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Authenticated user.
    pub user_id: UserId,
    /// Role agreed at login time.
    pub role: Role,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), DomainError> {
        self.0
            .insert(USER_ID_KEY, identity.user_id.as_ref())
            .and_then(|()| self.0.insert(ROLE_KEY, identity.role.name()))
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// Drop the stored identity.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the current identity from the session, if present and valid.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, DomainError> {
        let raw_user = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))?;
        let raw_role = self
            .0
            .get::<String>(ROLE_KEY)
            .map_err(|error| DomainError::internal(format!("failed to read session: {error}")))?;

        let (Some(raw_user), Some(raw_role)) = (raw_user, raw_role) else {
            return Ok(None);
        };

        let user_id = match UserId::new(raw_user) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("invalid user id in session cookie: {error}");
                return Ok(None);
            }
        };
        let role = match raw_role.parse::<Role>() {
            Ok(role) => role,
            Err(error) => {
                tracing::warn!("invalid role in session cookie: {error}");
                return Ok(None);
            }
        };

        Ok(Some(SessionIdentity { user_id, role }))
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<SessionIdentity, DomainError> {
        self.identity()?
            .ok_or_else(|| DomainError::unauthorized("login required"))
    }

    /// Require the manager role or return `403 Forbidden`.
    pub fn require_manager(&self) -> Result<SessionIdentity, DomainError> {
        let identity = self.require_identity()?;
        if identity.role != Role::Manager {
            return Err(DomainError::forbidden("manager role required"));
        }
        Ok(identity)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
