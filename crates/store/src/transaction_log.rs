use std::sync::Arc;

use chrono::{DateTime, Utc};

use crestbank_core::{AccountNumber, Transaction, TransactionId, TransactionStatus};

use crate::error::StoreError;

/// Append-only log of movement records.
///
/// `append` is the only way records are created. Records are never mutated
/// except through `update_status`, and only from `Pending` to a terminal
/// status; a terminal status is never overwritten. Records are never
/// deleted.
pub trait TransactionLog: Send + Sync {
    /// Append a new record. Fails with `DuplicateKey` on id reuse.
    fn append(&self, transaction: Transaction) -> Result<Transaction, StoreError>;

    /// Look up a record by transaction id.
    fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Transition a `Pending` record to a terminal status. Returns whether
    /// a matching pending record was found and transitioned.
    fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<bool, StoreError>;

    /// Records touching `account` on either side, newest first, capped at
    /// `limit`.
    fn list_by_account(
        &self,
        account: &AccountNumber,
        limit: usize,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Records dated within `[start, end]`, newest first.
    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Records currently in `status`, newest first.
    fn list_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>, StoreError>;
}

impl<L> TransactionLog for Arc<L>
where
    L: TransactionLog + ?Sized,
{
    fn append(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        (**self).append(transaction)
    }

    fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, StoreError> {
        (**self).get(id)
    }

    fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<bool, StoreError> {
        (**self).update_status(id, status)
    }

    fn list_by_account(
        &self,
        account: &AccountNumber,
        limit: usize,
    ) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_by_account(account, limit)
    }

    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_by_date_range(start, end)
    }

    fn list_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_by_status(status)
    }
}
