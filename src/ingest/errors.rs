use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::task::JoinError;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Could not open [{}]: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: io::Error
    },
    #[error("Could not read the header row of [{}]: {source}", .path.display())]
    Header {
        path: PathBuf,
        source: csv::Error
    },
    #[error("File [{}] has no header row", .path.display())]
    MissingHeader {
        path: PathBuf
    },
    #[error("Batch write failed while ingesting [{}]: {source}", .path.display())]
    Batch {
        path: PathBuf,
        source: StoreError
    },
    #[error("CSV reader for [{}] stopped unexpectedly: {source}", .path.display())]
    Reader {
        path: PathBuf,
        source: JoinError
    }
}

impl IngestError {
    pub fn open(path: &Path, source: io::Error) -> Self {
        Self::Open { path: path.to_path_buf(), source }
    }

    pub fn header(path: &Path, source: csv::Error) -> Self {
        Self::Header { path: path.to_path_buf(), source }
    }

    pub fn missing_header(path: &Path) -> Self {
        Self::MissingHeader { path: path.to_path_buf() }
    }

    pub fn batch(path: &Path, source: StoreError) -> Self {
        Self::Batch { path: path.to_path_buf(), source }
    }

    pub fn reader(path: &Path, source: JoinError) -> Self {
        Self::Reader { path: path.to_path_buf(), source }
    }

    /// True for defects that make a single file unusable without affecting the run.
    pub fn is_file_level(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Header { .. } | Self::MissingHeader { .. })
    }
}
