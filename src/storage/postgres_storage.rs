use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::models::ActivityEvent;
use crate::storage::schema::{CREATE_INDEXES, CREATE_TABLE, HAS_DATA, INSERT_COLUMNS, INSERT_PREFIX, INSERT_SUFFIX};
use crate::storage::{ActivityStore, StoreError};

/// PostgreSQL caps a single statement at 65 535 bind parameters.
const MAX_BIND_PARAMETERS: usize = 65_535;
const ROWS_PER_STATEMENT: usize = MAX_BIND_PARAMETERS / INSERT_COLUMNS;

#[derive(Clone)]
pub struct PgActivityStore {
    pool: PgPool
}

impl PgActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable("connection pool is closed".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.ensure_open()?;

        let mut transaction = self.pool.begin().await?;

        sqlx::query(CREATE_TABLE).execute(&mut *transaction).await?;

        for statement in CREATE_INDEXES {
            sqlx::query(statement).execute(&mut *transaction).await?;
        }

        transaction.commit().await?;

        Ok(())
    }

    async fn has_data(&self) -> Result<bool, StoreError> {
        self.ensure_open()?;

        let exists = sqlx::query_scalar::<_, bool>(HAS_DATA)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert_batch(&self, events: &[ActivityEvent]) -> Result<u64, StoreError> {
        if events.is_empty() {
            return Ok(0);
        }

        self.ensure_open()?;

        //NOTE: Dropping the transaction without a commit rolls the whole batch back
        let mut transaction = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in events.chunks(ROWS_PER_STATEMENT) {
            let mut builder = QueryBuilder::<Postgres>::new(INSERT_PREFIX);

            builder.push_values(chunk, |mut row, event| {
                row.push_bind(event.event_id)
                    .push_bind(event.merchant_id.as_str())
                    .push_bind(event.event_timestamp)
                    .push_bind(event.product.as_str())
                    .push_bind(event.event_type.as_str())
                    .push_bind(event.amount.value())
                    .push_bind(event.status.as_str())
                    .push_bind(event.channel.map(|channel| channel.as_str()))
                    .push_bind(event.region.as_deref())
                    .push_bind(event.merchant_tier.as_deref());
            });
            builder.push(INSERT_SUFFIX);

            inserted += builder.build().execute(&mut *transaction).await?.rows_affected();
        }

        transaction.commit().await?;

        debug!("Committed batch of {} event(s), {} new", events.len(), inserted);

        Ok(inserted)
    }
}
