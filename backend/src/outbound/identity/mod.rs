//! Outbound adapter for the external identity provider.

mod dto;
mod http_directory;

pub use http_directory::{HttpRoleDirectory, RoleDirectorySettings};
