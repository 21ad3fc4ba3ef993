mod analytics;
mod api;
mod config;
mod ingest;
mod models;
mod startup;
mod storage;
mod types;
mod validation;

use std::io::stderr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::api::AppState;
use crate::config::Config;
use crate::startup::{run_startup, StartupOutcome};
use crate::storage::PgActivityStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Invalid configuration")?;

    setup_logging(parse_log_level(&config.log_level));

    info!("=== Merchant Activity Analytics API starting up ===");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect_with(config.database.connect_options.clone())
        .await
        .inspect_err(|error| error!("Startup failed: could not connect to the database: {error}"))
        .context("Could not connect to the database")?;

    let store = Arc::new(PgActivityStore::new(pool.clone()));

    let timer = Instant::now();
    let outcome = run_startup(store, &config.ingest.data_dir, config.ingest.settings)
        .await
        .inspect_err(|error| error!("Startup failed: {error}"))?;

    if let StartupOutcome::Ingested(report) = &outcome {
        let (processed, inserted) = report.counts();

        info!(
            "Ingested {} file(s) in {:?}: {processed} processed, {inserted} inserted, {} rejected, {} skipped file(s)",
            report.files_ingested, timer.elapsed(), report.rejected, report.files_skipped
        );
    }

    let state = AppState {
        pool,
        analytics_year: config.analytics_year
    };

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await
        .with_context(|| format!("Could not bind to {address}"))?;

    info!("Server ready, listening on {address}");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("=== Merchant Activity Analytics API shutting down ===");

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                error!("Failed to install SIGTERM handler: {error}");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
