use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount error: Value is an empty string")]
    Empty,
    #[error("Amount error: {0}")]
    InvalidFormat(String),
    #[error("Amount error: Value [{0}] is negative")]
    Negative(String),
    #[error("Amount error: Value [{0}] does not fit the stored precision")]
    OutOfRange(String)
}
