use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Store error: {0}")]
    Unavailable(String)
}
