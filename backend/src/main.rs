//! Booking server entry point: load settings, migrate, wire adapters, serve.

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use barbershop::inbound::http::health::HealthState;
use barbershop::outbound::persistence::{DbPool, run_pending_migrations};
use barbershop::server::{
    AppSettings, BuildMode, ServerConfig, build_http_state, build_mailer, create_server,
    session_settings,
};

fn startup_error(stage: &'static str, error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{stage}: {error}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| startup_error("configuration", e))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("configuration", e))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(|e| startup_error("session", e))?;
    let smtp = settings
        .smtp_config()
        .map_err(|e| startup_error("configuration", e))?;

    let database_url = settings.database_url().to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|e| startup_error("migrations", e))?
        .map_err(|e| startup_error("migrations", e))?;
    info!(applied, "database schema is current");

    let pool = DbPool::new(settings.pool_config())
        .await
        .map_err(|e| startup_error("database pool", e))?;
    let mailer = build_mailer(smtp.as_ref()).map_err(|e| startup_error("mailer", e))?;
    let http_state = build_http_state(&pool, mailer, settings.email_timeout());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig {
            session,
            bind_addr,
            http_state,
        },
    )?;
    info!(%bind_addr, "barbershop listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
