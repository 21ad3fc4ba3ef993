use std::collections::HashMap;

use crate::ingest::LoaderStats;
use crate::models::RejectReason;

/// Totals for one ingestion run across every discovered file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct IngestReport {
    /// Data rows read, whatever their outcome.
    pub processed: u64,
    /// Events handed to the store as new; ids the store already held are included.
    pub inserted: u64,
    pub rejected: u64,
    pub rejections: HashMap<RejectReason, u64>,
    /// Flushed events the store skipped because their id was already present.
    pub duplicates: u64,
    pub batches: u64,
    pub files_ingested: usize,
    pub files_skipped: usize,
    pub files_failed: usize
}

impl IngestReport {
    /// The `(processed, inserted)` pair.
    pub fn counts(&self) -> (u64, u64) {
        (self.processed, self.inserted)
    }

    /// Rows that did not make it into a flushed batch.
    pub fn skipped(&self) -> u64 {
        self.processed.saturating_sub(self.inserted)
    }

    #[cfg(test)]
    pub fn rejected_for(&self, reason: RejectReason) -> u64 {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    pub(crate) fn record_rejection(&mut self, reason: RejectReason) {
        self.rejected += 1;
        *self.rejections.entry(reason).or_insert(0) += 1;
    }

    pub(crate) fn record_loader(&mut self, stats: LoaderStats) {
        self.inserted = stats.flushed;
        self.duplicates = stats.duplicates();
        self.batches = stats.batches;
    }
}
