mod errors;
#[cfg(test)]
mod memory_storage;
mod postgres_storage;
mod schema;

use async_trait::async_trait;

use crate::models::ActivityEvent;

pub use errors::StoreError;
#[cfg(test)]
pub use memory_storage::MemoryActivityStore;
pub use postgres_storage::PgActivityStore;

/// Persistence seam used by the ingestion pipeline.
///
/// Ingestion only ever writes through this trait, so the whole pipeline can be
/// driven against an in-memory implementation.
#[async_trait]
pub trait ActivityStore: Send + Sync + 'static {
    /// Creates the activity table and its secondary indexes if they are absent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Returns true when at least one event has been persisted.
    async fn has_data(&self) -> Result<bool, StoreError>;

    /// Persists a batch in a single transaction.
    ///
    /// Events whose `event_id` is already stored are skipped, not updated.
    /// Returns the number of rows that were actually new. An empty batch is a
    /// no-op that does not touch the store.
    async fn insert_batch(&self, events: &[ActivityEvent]) -> Result<u64, StoreError>;
}
