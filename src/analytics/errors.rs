use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Analytics query failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Year [{0}] is outside the supported calendar range")]
    InvalidYear(i32)
}
