//! Reqwest-backed role directory adapter.
//!
//! This adapter owns transport details only: request construction, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into
//! domain role objects. Provider domain and token arrive via constructor
//! injection, never ambient environment reads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use url::Url;
use serde_json::json;
use zeroize::Zeroizing;

use super::dto::RemoteRoleDto;
use crate::domain::ports::{RoleDirectory, RoleDirectoryError};
use crate::domain::{RemoteRole, RemoteRoleId, UserId};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the identity provider's management API.
pub struct RoleDirectorySettings {
    /// Base URL of the management API, e.g. `https://tenant.example.com/api/v2/`.
    pub base_url: Url,
    /// Bearer token for the management API.
    pub api_token: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RoleDirectorySettings {
    /// Build settings with the default request timeout.
    pub fn new(base_url: Url, api_token: impl Into<String>) -> Self {
        Self {
            base_url,
            api_token: Zeroizing::new(api_token.into()),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Role directory adapter performing HTTP requests against one provider.
pub struct HttpRoleDirectory {
    client: Client,
    base_url: Url,
    api_token: Zeroizing<String>,
}

impl HttpRoleDirectory {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: RoleDirectorySettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url,
            api_token: settings.api_token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RoleDirectoryError> {
        self.base_url.join(path).map_err(|err| {
            RoleDirectoryError::rejected(format!("invalid endpoint path {path}: {err}"))
        })
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, RoleDirectoryError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.api_token.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|err| {
            RoleDirectoryError::rejected(format!("undecodable role payload: {err}"))
        })
    }
}

#[async_trait]
impl RoleDirectory for HttpRoleDirectory {
    async fn list_roles_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RemoteRole>, RoleDirectoryError> {
        let url = self.endpoint(&format!("users/{user_id}/roles"))?;
        let roles: Vec<RemoteRoleDto> = self.get_json(url).await?;
        Ok(roles.into_iter().map(RemoteRole::from).collect())
    }

    async fn find_role_by_name(
        &self,
        name: &str,
    ) -> Result<Option<RemoteRole>, RoleDirectoryError> {
        let mut url = self.endpoint("roles")?;
        url.query_pairs_mut().append_pair("name_filter", name);
        let roles: Vec<RemoteRoleDto> = self.get_json(url).await?;
        Ok(roles
            .into_iter()
            .map(RemoteRole::from)
            .find(|role| role.name.eq_ignore_ascii_case(name)))
    }

    async fn assign_role(
        &self,
        role_id: &RemoteRoleId,
        user_id: &UserId,
    ) -> Result<(), RoleDirectoryError> {
        let url = self.endpoint(&format!("users/{user_id}/roles"))?;
        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_token.as_str())
            .json(&json!({ "roles": [role_id.as_str()] }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> RoleDirectoryError {
    RoleDirectoryError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RoleDirectoryError {
    let snippet: String = String::from_utf8_lossy(body).chars().take(200).collect();
    RoleDirectoryError::rejected(format!("status {status}: {snippet}"))
}
