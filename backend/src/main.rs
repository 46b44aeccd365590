//! Backend entry-point: configuration, storage selection, seeding, and the
//! HTTP listener.

use std::env;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use arena_backend::domain::ensure_seed_catalog;
use arena_backend::inbound::http::health::HealthState;
use arena_backend::inbound::http::state::HttpState;
use arena_backend::server::{AppSettings, build_notifier, build_storage, create_server};

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

    let settings =
        AppSettings::load_from_iter(env::args_os()).map_err(std::io::Error::other)?;

    let storage = build_storage(&settings).await?;
    let notifier = build_notifier(&settings)?;

    // A booking service with an empty catalogue is still able to serve
    // registrations; log a seeding failure and carry on.
    if let Err(e) = ensure_seed_catalog(storage.as_ref()).await {
        error!(error = %e, "catalogue seeding failed");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        HttpState::new(storage, notifier),
        settings.bind_addr(),
    )?;
    info!(addr = settings.bind_addr(), "listening");
    health_state.mark_ready();
    server.await
}
