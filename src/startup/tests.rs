use super::{run_startup, StartupError, StartupOutcome};

use anyhow::{anyhow, bail, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;
use uuid::Uuid;

use crate::ingest::IngestSettings;
use crate::models::{ActivityEvent, Product, Status};
use crate::storage::MemoryActivityStore;
use crate::types::Amount;

fn write_source_file(directory: &Path, rows: usize) -> Result<()> {
    let mut content = String::from("event_id,merchant_id,event_timestamp,product,event_type,amount,status\n");

    for _ in 0..rows {
        content.push_str(&format!("{},MRC-7,2024-07-01T00:00:00,SAVINGS,DEPOSIT,50,SUCCESS\n", Uuid::new_v4()));
    }

    fs::write(directory.join("activities_20240701.csv"), content)?;

    Ok(())
}

fn existing_event() -> Result<ActivityEvent> {
    Ok(ActivityEvent {
        event_id: Uuid::new_v4(),
        merchant_id: "MRC-1".to_string(),
        event_timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| anyhow!("invalid fixture date"))?,
        product: Product::Airtime,
        event_type: "AIRTIME_PURCHASE".to_string(),
        amount: Amount::from_str("5")?,
        status: Status::Success,
        channel: None,
        region: None,
        merchant_tier: None
    })
}

#[tokio::test]
async fn test_empty_store_is_loaded_from_the_source_directory() -> Result<()> {
    let directory = TempDir::new()?;
    write_source_file(directory.path(), 3)?;

    let store = Arc::new(MemoryActivityStore::new());
    let outcome = run_startup(store.clone(), directory.path(), IngestSettings::default()).await?;

    let StartupOutcome::Ingested(report) = outcome else {
        bail!("Expected ingestion to run against an empty store");
    };

    assert!(store.schema_ready());
    assert_eq!(report.counts(), (3, 3));
    assert_eq!(store.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_populated_store_skips_ingestion() -> Result<()> {
    let directory = TempDir::new()?;
    write_source_file(directory.path(), 3)?;

    let store = Arc::new(MemoryActivityStore::new());
    store.seed(existing_event()?);

    let outcome = run_startup(store.clone(), directory.path(), IngestSettings::default()).await?;

    assert_eq!(outcome, StartupOutcome::AlreadyLoaded);
    assert!(store.schema_ready());
    assert!(store.batch_sizes().is_empty());
    assert_eq!(store.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_restart_after_a_successful_load_does_not_reingest() -> Result<()> {
    let directory = TempDir::new()?;
    write_source_file(directory.path(), 2)?;

    let store = Arc::new(MemoryActivityStore::new());

    run_startup(store.clone(), directory.path(), IngestSettings::default()).await?;
    let restart = run_startup(store.clone(), directory.path(), IngestSettings::default()).await?;

    assert_eq!(restart, StartupOutcome::AlreadyLoaded);
    assert_eq!(store.batch_sizes(), vec![2]);

    Ok(())
}

#[tokio::test]
async fn test_schema_failure_is_fatal_and_skips_ingestion() -> Result<()> {
    let directory = TempDir::new()?;
    write_source_file(directory.path(), 2)?;

    let store = Arc::new(MemoryActivityStore::new().with_failing_schema());
    let result = run_startup(store.clone(), directory.path(), IngestSettings::default()).await;

    assert!(matches!(result, Err(StartupError::Schema(_))));
    assert!(store.batch_sizes().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_data_presence_check_failure_is_fatal_and_skips_ingestion() -> Result<()> {
    let directory = TempDir::new()?;
    write_source_file(directory.path(), 2)?;

    let store = Arc::new(MemoryActivityStore::new().with_failing_probe());
    let result = run_startup(store.clone(), directory.path(), IngestSettings::default()).await;

    assert!(matches!(result, Err(StartupError::Probe(_))));
    assert!(store.schema_ready());
    assert!(store.batch_sizes().is_empty());
    assert_eq!(store.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_ingestion_failure_is_surfaced_as_startup_failure() -> Result<()> {
    let directory = TempDir::new()?;
    write_source_file(directory.path(), 2)?;

    let store = Arc::new(MemoryActivityStore::new().with_failing_batch(1));
    let result = run_startup(store.clone(), directory.path(), IngestSettings::default()).await;

    assert!(matches!(result, Err(StartupError::Ingest(_))));

    Ok(())
}

#[tokio::test]
async fn test_empty_source_directory_still_completes_startup() -> Result<()> {
    let directory = TempDir::new()?;
    let store = Arc::new(MemoryActivityStore::new());

    let outcome = run_startup(store.clone(), directory.path(), IngestSettings::default()).await?;

    let StartupOutcome::Ingested(report) = outcome else {
        bail!("Expected an ingestion attempt against an empty store");
    };

    assert_eq!(report.counts(), (0, 0));
    assert!(store.schema_ready());

    Ok(())
}
