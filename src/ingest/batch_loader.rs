use std::mem;

use tracing::debug;

use crate::models::ActivityEvent;
use crate::storage::{ActivityStore, StoreError};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LoaderStats {
    /// Events handed to the store in successful batches.
    pub flushed: u64,
    /// Events the store reported as new rows.
    pub stored: u64,
    /// Successful flushes.
    pub batches: u64
}

impl LoaderStats {
    /// Events that were already present in the store.
    pub fn duplicates(&self) -> u64 {
        self.flushed.saturating_sub(self.stored)
    }
}

/// Buffers normalized events and writes them to the store in fixed-size batches.
///
/// Each flush is one store transaction. A batch that fails is dropped rather
/// than retried, so the buffer is always empty after `flush` returns.
pub struct BatchLoader<'a, S: ActivityStore + ?Sized> {
    store: &'a S,
    batch_size: usize,
    pending: Vec<ActivityEvent>,
    stats: LoaderStats
}

impl<'a, S: ActivityStore + ?Sized> BatchLoader<'a, S> {
    pub fn new(store: &'a S, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);

        Self {
            store,
            batch_size,
            pending: Vec::with_capacity(batch_size),
            stats: LoaderStats::default()
        }
    }

    /// Buffers an event, flushing once the batch threshold is reached.
    pub async fn push(&mut self, event: ActivityEvent) -> Result<(), StoreError> {
        self.pending.push(event);

        if self.pending.len() >= self.batch_size {
            self.flush().await?;
        }

        Ok(())
    }

    /// Writes any buffered events as a single batch.
    pub async fn flush(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let batch = mem::replace(&mut self.pending, Vec::with_capacity(self.batch_size));
        let stored = self.store.insert_batch(&batch).await?;

        self.stats.flushed += batch.len() as u64;
        self.stats.stored += stored;
        self.stats.batches += 1;

        debug!("Flushed batch [{}] with {} event(s), {} new", self.stats.batches, batch.len(), stored);

        Ok(())
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> LoaderStats {
        self.stats
    }
}
