use crate::ingest::{discover_files, BatchLoader, IngestError, IngestReport, IngestSettings};
use crate::models::{RawRecord, RejectReason};
use crate::storage::ActivityStore;
use crate::validation::{normalize, Normalized};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info, warn};

type RowResult = Result<RawRecord, csv::Error>;

/// Drives every source file in a directory through validation and batched loading.
pub struct Ingestor<S: ActivityStore> {
    store: Arc<S>,
    settings: IngestSettings,
    backpressure: usize
}

impl<S: ActivityStore> Ingestor<S> {
    /// Creates an ingestor writing to the provided store with default settings.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            settings: IngestSettings::default(),
            backpressure: 1024
        }
    }

    pub fn with_settings(mut self, settings: IngestSettings) -> Self {
        self.settings = settings;
        self
    }

    #[cfg(test)]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.settings.batch_size = batch_size;
        self
    }

    /// Ingests every `activities_*.csv` file in `directory`, in name order.
    ///
    /// Unreadable files are logged and skipped. A failed batch aborts the run
    /// unless `continue_on_batch_error` is set, in which case only the rest of
    /// that file is abandoned. Batches committed before a failure stay committed.
    pub async fn ingest_all(&self, directory: &Path) -> Result<IngestReport, IngestError> {
        let files = discover_files(directory);
        let mut report = IngestReport::default();

        if files.is_empty() {
            warn!("No CSV files found matching [{}]", directory.join("activities_*.csv").display());
            return Ok(report);
        }

        info!("Found {} CSV file(s) to ingest", files.len());

        let mut loader = BatchLoader::new(self.store.as_ref(), self.settings.batch_size);

        for path in &files {
            info!("Ingesting: {}", path.display());

            match self.ingest_file(path, &mut loader, &mut report).await {
                Ok(rows) => {
                    report.files_ingested += 1;
                    info!("  -> {rows} rows processed from {}", file_name(path));
                }
                Err(error) if error.is_file_level() => {
                    report.files_skipped += 1;
                    error!("{error}");
                }
                Err(error) if self.settings.continue_on_batch_error => {
                    report.files_failed += 1;
                    error!("{error}; abandoning the rest of the file");
                }
                Err(error) => return Err(error)
            }
        }

        report.record_loader(loader.stats());

        info!(
            "Ingestion done. Processed: {} | Inserted: {} | Skipped: {} | Duplicates: {}",
            report.processed, report.inserted, report.skipped(), report.duplicates
        );

        for (reason, count) in &report.rejections {
            info!("  -> {count} row(s) rejected: {reason}");
        }

        Ok(report)
    }

    async fn ingest_file(&self, path: &Path, loader: &mut BatchLoader<'_, S>, report: &mut IngestReport) -> Result<u64, IngestError> {
        let (sender, mut receiver) = mpsc::channel::<RowResult>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_path_buf(), sender);
        let mut rows = 0;

        while let Some(row) = receiver.recv().await {
            rows += 1;
            report.processed += 1;

            let outcome = match row {
                Ok(raw) => normalize(&raw),
                Err(error) => {
                    debug!("CSV deserialization error in {}: {error}", file_name(path));
                    Normalized::Rejected(RejectReason::Malformed)
                }
            };

            match outcome {
                Normalized::Accepted(event) => {
                    loader.push(event).await.map_err(|source| IngestError::batch(path, source))?;
                }
                Normalized::Rejected(reason) => {
                    debug!("Rejected row [{rows}] of {}: {reason}", file_name(path));
                    report.record_rejection(reason);
                }
            }
        }

        csv_handle.await.map_err(|source| IngestError::reader(path, source))??;

        loader.flush().await.map_err(|source| IngestError::batch(path, source))?;

        Ok(rows)
    }

    fn spawn_csv_reader(&self, path: PathBuf, sender: mpsc::Sender<RowResult>) -> JoinHandle<Result<(), IngestError>> {
        spawn_blocking(move || {
            let file = File::open(&path).map_err(|source| IngestError::open(&path, source))?;

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            let headers = reader.headers().map_err(|source| IngestError::header(&path, source))?;

            if headers.iter().all(str::is_empty) {
                return Err(IngestError::missing_header(&path));
            }

            for result in reader.deserialize::<RawRecord>() {
                //NOTE: The receiver is gone once the file has been abandoned, stop reading
                if sender.blocking_send(result).is_err() {
                    break;
                }
            }

            Ok(())
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
