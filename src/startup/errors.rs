use thiserror::Error;

use crate::ingest::IngestError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not prepare the activity schema: {0}")]
    Schema(#[source] StoreError),
    #[error("Could not check whether activity data is already loaded: {0}")]
    Probe(#[source] StoreError),
    #[error("Initial ingestion failed: {0}")]
    Ingest(#[from] IngestError)
}
