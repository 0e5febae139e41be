use chau_domain::{TransactionError, TransactionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] TransactionError),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),
    #[error("Validation failed: {0}")]
    Validation(String),
}
