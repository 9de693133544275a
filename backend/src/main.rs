//! Backend entry-point: loads settings, selects the user store, and serves
//! the REST API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, build_repository, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(|err| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("invalid BANK_BIND_ADDR: {err}"))
    })?;
    let repository = build_repository(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(bind_addr, repository))?;
    info!(%bind_addr, "listening");
    server.await
}
