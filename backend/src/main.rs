//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use travel_requests::inbound::http::health::HealthState;
use travel_requests::outbound::persistence::{TokioSleeper, prepare_database};

use server::{AppDependencies, ServerSettings, build_production_state, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load server settings")?;
    info!(settings = ?settings, "starting travel requests backend");

    let secret = settings.jwt_secret()?;
    let cors_origins = settings.cors_origins()?;
    let pool = prepare_database(
        settings.pool_config()?,
        settings.retry_policy(),
        &TokioSleeper,
    )
    .await
    .wrap_err("database bootstrap failed")?;

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new(Arc::clone(&clock))),
        http_state: web::Data::new(build_production_state(&pool, &secret, clock)),
        cors_origins,
    };

    let bind_addr = settings.bind_addr();
    let server = create_server(deps, bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
