mod batch_loader;
mod discovery;
mod errors;
mod orchestrator;
mod report;

pub use batch_loader::{BatchLoader, LoaderStats};
pub use discovery::discover_files;
#[cfg(test)]
pub use discovery::is_source_file_name;
pub use errors::IngestError;
pub use orchestrator::Ingestor;
pub use report::IngestReport;

/// Number of events written per transaction unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 5_000;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IngestSettings {
    /// Events buffered before a batch is flushed to the store.
    pub batch_size: usize,
    /// When set, a failed batch abandons only the file it belongs to.
    pub continue_on_batch_error: bool
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            continue_on_batch_error: false
        }
    }
}
