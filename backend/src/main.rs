//! Coedit backend entry point: loads configuration, prepares adapters and
//! runs the HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use coedit::inbound::http::health::HealthState;
use coedit::inbound::http::session_config::fingerprint::key_fingerprint;
use coedit::inbound::http::session_config::{
    BuildMode, SessionSettings, session_settings_from_env,
};
use coedit::outbound::languagetool::LanguageToolChecker;
use coedit::outbound::liveblocks::LiveblocksBroker;
use coedit::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use coedit::settings::{AppSettings, ValidatedSettings};
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }
}

#[cfg(feature = "metrics")]
fn initialize_metrics<E: std::fmt::Display>(
    build: impl FnOnce() -> Result<PrometheusMetrics, E>,
) -> Option<PrometheusMetrics> {
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without");
            None
        }
    }
}

async fn connect_database(database_url: &str) -> Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to run migrations")?;
    info!(applied, "database migrations complete");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to build database pool")
}

fn load_session(mode: BuildMode) -> Result<SessionSettings> {
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .wrap_err("invalid session configuration")?;
    info!(fingerprint = %key_fingerprint(&session.key), "session key loaded");
    Ok(session)
}

async fn server_config(settings: &ValidatedSettings) -> Result<ServerConfig> {
    let session = load_session(BuildMode::from_debug_assertions())?;

    let checker = LanguageToolChecker::new(
        settings.language_tool_url.clone(),
        settings.request_timeout,
    )
    .wrap_err("failed to build grammar client")?;
    let mut config = ServerConfig::new(session, settings.bind_addr, Arc::new(checker))
        .with_request_timeout(settings.request_timeout);

    match &settings.liveblocks_secret_key {
        Some(secret) => {
            let broker = LiveblocksBroker::new(
                &settings.liveblocks_api_url,
                secret.clone(),
                settings.request_timeout,
            )
            .wrap_err("failed to build collaboration broker")?;
            info!(endpoint = %broker.endpoint(), "collaboration broker configured");
            config = config.with_broker(Arc::new(broker));
        }
        None => warn!("COEDIT_LIVEBLOCKS_SECRET_KEY not set; collaboration auth disabled"),
    }

    match &settings.database_url {
        Some(url) => config = config.with_db_pool(connect_database(url).await?),
        None => warn!("COEDIT_DATABASE_URL not set; using in-memory stores"),
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("coedit")
            .endpoint("/metrics")
            .build()
    }));

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load()
        .map_err(|error| eyre!("failed to load configuration: {error}"))?
        .validate()
        .wrap_err("invalid configuration")?;
    info!(?settings, "configuration loaded");

    let config = server_config(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!(addr = %settings.bind_addr, "listening");
    server.await.wrap_err("server error")
}
