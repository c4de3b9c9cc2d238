//! Backend entry-point: wires REST endpoints, adapters, and OpenAPI docs.

mod server;

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ortho_config::OrthoConfig;
use url::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::identity::{HttpRoleDirectory, RoleDirectorySettings};
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{AppSettings, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;

    let key = load_session_key(&settings)?;
    let bind_addr = settings
        .bind_addr()
        .parse()
        .wrap_err_with(|| format!("invalid bind address {}", settings.bind_addr()))?;

    let mut config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr);

    if let Some(database_url) = settings.database_url.clone() {
        run_migrations(database_url.clone()).await?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database configured, using in-memory stores");
    }

    if let Some(base_url) = settings.identity_base_url.as_deref() {
        let token = settings
            .identity_api_token
            .clone()
            .ok_or_else(|| eyre!("identity base URL configured without an API token"))?;
        let base_url = Url::parse(base_url)
            .wrap_err_with(|| format!("invalid identity base URL {base_url}"))?;
        let mut directory_settings = RoleDirectorySettings::new(base_url, token);
        directory_settings.timeout = settings.identity_timeout();
        let directory =
            HttpRoleDirectory::new(directory_settings).wrap_err("failed to build HTTP client")?;
        config = config.with_role_directory(Arc::new(directory));
    } else {
        info!("no identity provider configured, using the fixture role directory");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await.wrap_err("server terminated with an error")
}

fn load_session_key(settings: &AppSettings) -> color_eyre::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(eyre!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                ))
            }
        }
    }
}

async fn run_migrations(database_url: String) -> color_eyre::Result<()> {
    let outcome = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|err| format!("failed to connect for migrations: {err}"))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.len())
            .map_err(|err| format!("failed to run migrations: {err}"))
    });

    let applied = tokio::time::timeout(Duration::from_secs(60), outcome)
        .await
        .wrap_err("migrations timed out")?
        .wrap_err("migration task panicked")?
        .map_err(|message| eyre!(message))?;

    info!(applied, "database migrations up to date");
    Ok(())
}
