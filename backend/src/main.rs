//! User directory entry-point: loads configuration, connects to the
//! document store and serves the HTTP API.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, drain_on, shutdown_signal};
use user_directory::inbound::http::health::HealthState;
use user_directory::outbound::persistence::{MongoUserRepository, StoreClient};
use user_directory::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let dotenv = dotenvy::dotenv();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => debug!("no environment file found"),
        Err(e) => warn!(error = %e, "failed to load environment file"),
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let store_config = settings.store_config().map_err(io::Error::other)?;

    let store = StoreClient::connect(&store_config)
        .await
        .map_err(io::Error::other)?;
    let repository = Arc::new(MongoUserRepository::new(store));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, repository),
    )?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    server.await
}
