//! Wire types for the identity provider's role management API.

use serde::Deserialize;

use crate::domain::RemoteRole;

/// One role object as serialised by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRoleDto {
    /// Provider-issued identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional human description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<RemoteRoleDto> for RemoteRole {
    fn from(value: RemoteRoleDto) -> Self {
        let mut role = RemoteRole::new(value.id, value.name);
        role.description = value.description;
        role
    }
}
