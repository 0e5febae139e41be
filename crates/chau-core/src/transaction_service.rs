//! Mutations of the in-memory transaction list.

use tracing::debug;

use chau_domain::{Displayable, Identifiable, Transaction, TransactionId};

use crate::CoreError;

/// Provides add/remove helpers for the newest-first transaction list.
pub struct TransactionService;

impl TransactionService {
    /// Prepends `transaction` so the list stays newest-first.
    ///
    /// Identifiers must stay unique; an id already in the list is rejected.
    pub fn add(
        transactions: &mut Vec<Transaction>,
        transaction: Transaction,
    ) -> Result<TransactionId, CoreError> {
        let id = transaction.id().clone();
        if Self::find(transactions, &id).is_some() {
            return Err(CoreError::Validation(format!(
                "transaction id {id} already exists"
            )));
        }
        debug!(txn = %transaction.display_label(), "adding transaction");
        transactions.insert(0, transaction);
        Ok(id)
    }

    /// Removes the first transaction carrying `id`.
    pub fn remove(
        transactions: &mut Vec<Transaction>,
        id: &TransactionId,
    ) -> Result<Transaction, CoreError> {
        let index = transactions
            .iter()
            .position(|txn| txn.id() == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.clone()))?;
        let removed = transactions.remove(index);
        debug!(txn = %removed.display_label(), "removed transaction");
        Ok(removed)
    }

    pub fn find<'a>(
        transactions: &'a [Transaction],
        id: &TransactionId,
    ) -> Option<&'a Transaction> {
        transactions.iter().find(|txn| txn.id() == id)
    }

    /// The first `limit` entries in list order.
    pub fn recent(transactions: &[Transaction], limit: usize) -> &[Transaction] {
        &transactions[..limit.min(transactions.len())]
    }

    /// Empties the list, returning how many entries were dropped.
    pub fn clear(transactions: &mut Vec<Transaction>) -> usize {
        let count = transactions.len();
        transactions.clear();
        count
    }
}
