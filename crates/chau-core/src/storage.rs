use std::{
    collections::HashSet,
    io,
    sync::{Mutex, MutexGuard},
};

use chau_domain::{Identifiable, Transaction};
use thiserror::Error;

/// Failures raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Abstraction over the key-value store holding the transaction list.
///
/// The list is always read and written as a whole.
pub trait TransactionStore: Send + Sync {
    fn load(&self) -> Result<Vec<Transaction>, StoreError>;
    fn save(&self, transactions: &[Transaction]) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Volatile store, used for sessions without durable storage and in tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    transactions: Mutex<Vec<Transaction>>,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            unavailable: false,
        }
    }

    /// A store whose every operation fails, mimicking a disabled backend.
    pub fn unavailable() -> Self {
        Self {
            transactions: Mutex::default(),
            unavailable: true,
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<Transaction>>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("in-memory store disabled".into()));
        }
        self.transactions
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store poisoned".into()))
    }
}

impl TransactionStore for InMemoryStore {
    fn load(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.guard()?.clone())
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        *self.guard()? = transactions.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.guard()?.clear();
        Ok(())
    }
}

/// Detects duplicate identifiers and unrecognized categories in a loaded list.
pub fn store_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for txn in transactions {
        if !seen.insert(txn.id()) {
            warnings.push(format!("transaction id {} appears more than once", txn.id()));
        }
        if !txn.category().is_known() {
            warnings.push(format!(
                "transaction {} uses unrecognized category `{}`",
                txn.id(),
                txn.category()
            ));
        }
    }
    warnings
}
