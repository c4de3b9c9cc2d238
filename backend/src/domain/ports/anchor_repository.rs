//! Port for the singleton anchor location record.

use async_trait::async_trait;

use crate::domain::AnchorLocation;

use super::define_port_error;

define_port_error! {
    /// Errors raised by anchor repository adapters.
    pub enum AnchorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "anchor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "anchor repository query failed: {message}",
    }
}

/// Port for reading and replacing the organisation's single anchor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnchorRepository: Send + Sync {
    /// Fetch the anchor, if one has been configured.
    async fn get(&self) -> Result<Option<AnchorLocation>, AnchorRepositoryError>;

    /// Insert or replace the anchor.
    async fn set(&self, anchor: &AnchorLocation) -> Result<(), AnchorRepositoryError>;
}

/// Fixture repository reporting no configured anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnchorRepository;

#[async_trait]
impl AnchorRepository for FixtureAnchorRepository {
    async fn get(&self) -> Result<Option<AnchorLocation>, AnchorRepositoryError> {
        Ok(None)
    }

    async fn set(&self, _anchor: &AnchorLocation) -> Result<(), AnchorRepositoryError> {
        Ok(())
    }
}
