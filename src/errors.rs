use std::result::Result as StdResult;

use chau_config::ConfigError;
use chau_core::{CoreError, StoreError};
use chau_domain::TransactionError;
use thiserror::Error;

/// Unified error type for the application facade.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] TransactionError),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Persistence error: {0}")]
    Store(#[from] StoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Serialization error: {0}")]
    Serde(String),
}

pub type Result<T> = StdResult<T, AppError>;

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTransaction(err) => AppError::InvalidTransaction(err),
            CoreError::TransactionNotFound(id) => AppError::TransactionNotFound(id.to_string()),
            CoreError::Validation(message) => AppError::InvalidInput(message),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serde(err.to_string())
    }
}
