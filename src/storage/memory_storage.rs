use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::ActivityEvent;
use crate::storage::{ActivityStore, StoreError};
use crate::types::EventId;

/// In-memory stand-in for the relational store.
///
/// Honours the same contract as the PostgreSQL store: first write wins per
/// `event_id`, and a failed batch leaves no trace. Failures can be injected
/// to exercise the error paths of the pipeline.
pub struct MemoryActivityStore {
    events: Arc<DashMap<EventId, ActivityEvent>>,
    schema_ready: AtomicBool,
    fail_schema: bool,
    fail_probe: bool,
    fail_on_batch: Option<usize>,
    batch_calls: AtomicUsize,
    batch_sizes: Mutex<Vec<usize>>
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self {
            events: Arc::new(DashMap::new()),
            schema_ready: AtomicBool::new(false),
            fail_schema: false,
            fail_probe: false,
            fail_on_batch: None,
            batch_calls: AtomicUsize::new(0),
            batch_sizes: Mutex::new(Vec::new())
        }
    }

    /// Makes `ensure_schema` fail.
    pub fn with_failing_schema(mut self) -> Self {
        self.fail_schema = true;
        self
    }

    /// Makes `has_data` fail.
    pub fn with_failing_probe(mut self) -> Self {
        self.fail_probe = true;
        self
    }

    /// Makes the n-th call (1-based) to `insert_batch` fail.
    pub fn with_failing_batch(mut self, call: usize) -> Self {
        self.fail_on_batch = Some(call);
        self
    }

    pub fn seed(&self, event: ActivityEvent) {
        self.events.insert(event.event_id, event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn get(&self, event_id: &EventId) -> Option<ActivityEvent> {
        self.events.get(event_id).map(|entry| entry.value().clone())
    }

    pub fn schema_ready(&self) -> bool {
        self.schema_ready.load(Ordering::SeqCst)
    }

    /// Sizes of every batch handed to `insert_batch`, including failed ones.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().map(|sizes| sizes.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        if self.fail_schema {
            return Err(StoreError::Unavailable("schema could not be created".to_string()));
        }

        self.schema_ready.store(true, Ordering::SeqCst);

        Ok(())
    }

    async fn has_data(&self) -> Result<bool, StoreError> {
        if self.fail_probe {
            return Err(StoreError::Unavailable("data presence could not be checked".to_string()));
        }

        Ok(!self.events.is_empty())
    }

    async fn insert_batch(&self, events: &[ActivityEvent]) -> Result<u64, StoreError> {
        if events.is_empty() {
            return Ok(0);
        }

        let call = self.batch_calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut sizes) = self.batch_sizes.lock() {
            sizes.push(events.len());
        }

        if self.fail_on_batch == Some(call) {
            return Err(StoreError::Unavailable(format!("batch {call} was rejected by the store")));
        }

        let mut inserted = 0;

        for event in events {
            if let Entry::Vacant(entry) = self.events.entry(event.event_id) {
                entry.insert(event.clone());
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}
