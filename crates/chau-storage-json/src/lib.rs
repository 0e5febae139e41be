use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chau_core::{fs_util::write_atomic, StoreError, TransactionStore};
use chau_domain::Transaction;
use tracing::{debug, warn};

/// File name the transaction list is persisted under.
pub const TRANSACTIONS_FILE: &str = "chau_money_transactions.json";

/// Filesystem-backed JSON persistence for the transaction list.
#[derive(Debug, Clone)]
pub struct JsonTransactionStore {
    root: PathBuf,
}

impl JsonTransactionStore {
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(TRANSACTIONS_FILE)
    }
}

impl TransactionStore for JsonTransactionStore {
    fn load(&self) -> Result<Vec<Transaction>, StoreError> {
        let path = self.path();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no transaction file yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let transactions = parse_transactions(&data).map_err(|err| {
            warn!(path = %path.display(), error = %err, "transaction file unreadable");
            err
        })?;
        debug!(
            path = %path.display(),
            count = transactions.len(),
            "transactions loaded"
        );
        Ok(transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        let path = self.path();
        write_atomic(&path, &serialize_transactions(transactions)?)?;
        debug!(
            path = %path.display(),
            count = transactions.len(),
            "transactions saved"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Parses a JSON array of transactions. Blank input reads as an empty list.
pub fn parse_transactions(data: &str) -> Result<Vec<Transaction>, StoreError> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(data).map_err(|err| StoreError::Corrupt(err.to_string()))
}

pub fn serialize_transactions(transactions: &[Transaction]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(transactions).map_err(|err| StoreError::Corrupt(err.to_string()))
}
