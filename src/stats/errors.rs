use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
