//! Storefront entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use std::net::{IpAddr, SocketAddr};

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use storefront::inbound::http::health::HealthState;
use storefront::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use storefront::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let ip: IpAddr = settings
        .host()
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid host {}: {e}", settings.host())))?;
    let mut config = ServerConfig::new(SocketAddr::new(ip, settings.port()));

    if let Some(url) = settings.database_url() {
        if settings.run_migrations() {
            run_pending_migrations(url.to_owned())
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.database_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        info!("database pool ready");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
