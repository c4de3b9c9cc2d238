//! Application settings loaded via OrthoConfig.
//!
//! Values merge CLI flags, `SHIFTWATCH_`-prefixed environment variables, and
//! configuration files. Optional collaborators (database, identity provider)
//! select in-memory / fixture adapters when absent, which keeps local
//! development servers runnable with no external services.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_IDENTITY_TIMEOUT_SECONDS: u64 = 10;

/// Top-level application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHIFTWATCH")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Require the `Secure` attribute on session cookies.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// File holding the session key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow an ephemeral session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// PostgreSQL connection string; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Identity provider management API base URL; the fixture directory is
    /// used when absent.
    pub identity_base_url: Option<String>,
    /// Bearer token for the identity provider management API.
    pub identity_api_token: Option<String>,
    /// Per-request timeout for identity provider calls, in seconds.
    pub identity_timeout_seconds: Option<u64>,
}

impl AppSettings {
    /// Bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Session key file path, falling back to the default.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Identity provider request timeout.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(
            self.identity_timeout_seconds
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_SECONDS),
        )
    }
}
