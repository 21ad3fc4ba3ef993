use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::ingest::{IngestReport, IngestSettings, Ingestor};
use crate::startup::StartupError;
use crate::storage::ActivityStore;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum StartupOutcome {
    /// The store already held events, so ingestion was skipped.
    AlreadyLoaded,
    Ingested(IngestReport)
}

/// Prepares the store before the API starts serving.
///
/// The schema is always ensured. Ingestion only runs against an empty store,
/// so restarting the process never reloads data. Every failure is returned to
/// the caller, which must not start serving.
pub async fn run_startup<S: ActivityStore>(store: Arc<S>, source_directory: &Path, settings: IngestSettings) -> Result<StartupOutcome, StartupError> {
    info!("Initialising database schema");
    store.ensure_schema().await.map_err(StartupError::Schema)?;

    if store.has_data().await.map_err(StartupError::Probe)? {
        info!("Data already loaded, skipping ingestion");
        return Ok(StartupOutcome::AlreadyLoaded);
    }

    info!("Loading CSV data from [{}]", source_directory.display());

    let report = Ingestor::new(store)
        .with_settings(settings)
        .ingest_all(source_directory)
        .await?;

    info!("Startup complete. {} processed / {} inserted", report.processed, report.inserted);

    Ok(StartupOutcome::Ingested(report))
}
