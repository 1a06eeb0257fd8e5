use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crestbank_core::{
    Account, AccountNumber, CustomerId, Transaction, TransactionId, TransactionStatus,
};

use crate::account_store::AccountStore;
use crate::error::StoreError;
use crate::transaction_log::TransactionLog;

/// In-memory account store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountNumber, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get(&self, account: &AccountNumber) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| StoreError::Poisoned)?;
        Ok(accounts.get(account).cloned())
    }

    fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| StoreError::Poisoned)?;
        if accounts.contains_key(&account.account_number) {
            return Err(StoreError::DuplicateKey(
                account.account_number.to_string(),
            ));
        }
        tracing::info!("account created: {}", account.account_number);
        accounts.insert(account.account_number.clone(), account.clone());
        Ok(account)
    }

    fn compare_and_set_balance(
        &self,
        account: &AccountNumber,
        expected: Decimal,
        new: Decimal,
    ) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| StoreError::Poisoned)?;
        let Some(record) = accounts.get_mut(account) else {
            return Ok(false);
        };
        if !record.is_active || record.balance != expected {
            return Ok(false);
        }
        record.balance = new;
        record.updated_at = Utc::now();
        Ok(true)
    }

    fn deactivate(&self, account: &AccountNumber) -> Result<bool, StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| StoreError::Poisoned)?;
        let Some(record) = accounts.get_mut(account) else {
            return Ok(false);
        };
        record.is_active = false;
        record.updated_at = Utc::now();
        tracing::info!("account deactivated: {}", account);
        Ok(true)
    }

    fn list_by_customer(&self, customer: &CustomerId) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| StoreError::Poisoned)?;
        Ok(accounts
            .values()
            .filter(|a| &a.customer_id == customer)
            .cloned()
            .collect())
    }

    fn list_active(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| StoreError::Poisoned)?;
        Ok(accounts.values().filter(|a| a.is_active).cloned().collect())
    }
}

#[derive(Debug, Default)]
struct LogInner {
    /// Insertion order of transaction ids; breaks ties between records
    /// sharing a timestamp when sorting newest-first.
    order: Vec<TransactionId>,
    records: HashMap<TransactionId, Transaction>,
}

/// In-memory append-only transaction log.
#[derive(Debug, Default)]
pub struct InMemoryTransactionLog {
    inner: RwLock<LogInner>,
}

impl InMemoryTransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of records matching `keep`, newest first.
    fn collect_newest_first(
        &self,
        keep: impl Fn(&Transaction) -> bool,
    ) -> Result<Vec<Transaction>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut out: Vec<Transaction> = inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.records.get(id))
            .filter(|t| keep(t))
            .cloned()
            .collect();
        // Stable sort: among equal dates, later insertions stay first.
        out.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        Ok(out)
    }
}

impl TransactionLog for InMemoryTransactionLog {
    fn append(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if inner.records.contains_key(&transaction.transaction_id) {
            return Err(StoreError::DuplicateKey(
                transaction.transaction_id.to_string(),
            ));
        }
        inner.order.push(transaction.transaction_id.clone());
        inner
            .records
            .insert(transaction.transaction_id.clone(), transaction.clone());
        Ok(transaction)
    }

    fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.records.get(id).cloned())
    }

    fn update_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let Some(record) = inner.records.get_mut(id) else {
            return Ok(false);
        };
        if !record.status.can_transition_to(status) {
            return Ok(false);
        }
        record.status = status;
        Ok(true)
    }

    fn list_by_account(
        &self,
        account: &AccountNumber,
        limit: usize,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut out = self.collect_newest_first(|t| t.involves(account))?;
        out.truncate(limit);
        Ok(out)
    }

    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        self.collect_newest_first(|t| t.transaction_date >= start && t.transaction_date <= end)
    }

    fn list_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>, StoreError> {
        self.collect_newest_first(|t| t.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crestbank_core::AccountType;

    fn acc_no(n: &str) -> AccountNumber {
        AccountNumber::new(n)
    }

    fn txn_id(n: &str) -> TransactionId {
        TransactionId::new(n)
    }

    fn account(n: &str, balance: i64) -> Account {
        Account::open(
            acc_no(n),
            CustomerId::new("CUST0001"),
            AccountType::Checking,
            Decimal::from(balance),
            Utc::now(),
        )
    }

    #[test]
    fn create_rejects_duplicate_account_number() {
        let store = InMemoryAccountStore::new();
        store.create(account("ACC1", 0)).unwrap();
        let err = store.create(account("ACC1", 5)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[test]
    fn cas_applies_only_on_matching_balance() {
        let store = InMemoryAccountStore::new();
        store.create(account("ACC1", 100)).unwrap();

        // stale expected balance: nothing changes
        let applied = store
            .compare_and_set_balance(&acc_no("ACC1"), Decimal::from(90), Decimal::from(10))
            .unwrap();
        assert!(!applied);
        assert_eq!(
            store.get(&acc_no("ACC1")).unwrap().unwrap().balance,
            Decimal::from(100)
        );

        let applied = store
            .compare_and_set_balance(&acc_no("ACC1"), Decimal::from(100), Decimal::from(130))
            .unwrap();
        assert!(applied);
        let updated = store.get(&acc_no("ACC1")).unwrap().unwrap();
        assert_eq!(updated.balance, Decimal::from(130));
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn cas_refuses_inactive_and_missing_accounts() {
        let store = InMemoryAccountStore::new();
        store.create(account("ACC1", 100)).unwrap();
        assert!(store.deactivate(&acc_no("ACC1")).unwrap());

        let applied = store
            .compare_and_set_balance(&acc_no("ACC1"), Decimal::from(100), Decimal::from(50))
            .unwrap();
        assert!(!applied);

        let applied = store
            .compare_and_set_balance(&acc_no("ACC404"), Decimal::ZERO, Decimal::ONE)
            .unwrap();
        assert!(!applied);
    }

    #[test]
    fn deactivate_keeps_the_record() {
        let store = InMemoryAccountStore::new();
        store.create(account("ACC1", 10)).unwrap();
        assert!(store.deactivate(&acc_no("ACC1")).unwrap());
        let record = store.get(&acc_no("ACC1")).unwrap().unwrap();
        assert!(!record.is_active);
        assert_eq!(record.balance, Decimal::from(10));
        assert!(!store.deactivate(&acc_no("ACC404")).unwrap());
    }

    #[test]
    fn list_by_customer_and_active() {
        let store = InMemoryAccountStore::new();
        store.create(account("ACC1", 0)).unwrap();
        store.create(account("ACC2", 0)).unwrap();
        let mut other = account("ACC3", 0);
        other.customer_id = CustomerId::new("CUST0002");
        store.create(other).unwrap();
        store.deactivate(&acc_no("ACC2")).unwrap();

        let mine = store
            .list_by_customer(&CustomerId::new("CUST0001"))
            .unwrap();
        assert_eq!(mine.len(), 2);
        let active = store.list_active().unwrap();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|a| a.is_active));
    }

    #[test]
    fn append_rejects_id_reuse() {
        let log = InMemoryTransactionLog::new();
        let t = Transaction::deposit(txn_id("TXN1"), acc_no("ACC1"), Decimal::ONE, "d", Utc::now());
        log.append(t.clone()).unwrap();
        assert!(matches!(log.append(t).unwrap_err(), StoreError::DuplicateKey(_)));
    }

    #[test]
    fn update_status_only_moves_pending_to_terminal() {
        let log = InMemoryTransactionLog::new();
        let mut t = Transaction::deposit(txn_id("TXN1"), acc_no("ACC1"), Decimal::ONE, "d", Utc::now());
        t.status = TransactionStatus::Pending;
        log.append(t).unwrap();

        assert!(log
            .update_status(&txn_id("TXN1"), TransactionStatus::Completed)
            .unwrap());
        // terminal status is never overwritten
        assert!(!log
            .update_status(&txn_id("TXN1"), TransactionStatus::Cancelled)
            .unwrap());
        assert_eq!(
            log.get(&txn_id("TXN1")).unwrap().unwrap().status,
            TransactionStatus::Completed
        );
        assert!(!log
            .update_status(&txn_id("TXN404"), TransactionStatus::Failed)
            .unwrap());
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let log = InMemoryTransactionLog::new();
        let base = Utc::now();
        for i in 0..5 {
            let mut t = Transaction::deposit(
                txn_id(&format!("TXN{i}")),
                acc_no("ACC1"),
                Decimal::from(i),
                "d",
                base + Duration::seconds(i),
            );
            t.status = TransactionStatus::Completed;
            log.append(t).unwrap();
        }

        let history = log.list_by_account(&acc_no("ACC1"), 3).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].transaction_id, txn_id("TXN4"));
        assert_eq!(history[2].transaction_id, txn_id("TXN2"));

        let none = log.list_by_account(&acc_no("ACC404"), 10).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let log = InMemoryTransactionLog::new();
        let base = Utc::now();
        for i in 0..3 {
            log.append(Transaction::deposit(
                txn_id(&format!("TXN{i}")),
                acc_no("ACC1"),
                Decimal::ONE,
                "d",
                base + Duration::minutes(i),
            ))
            .unwrap();
        }

        let hits = log
            .list_by_date_range(base, base + Duration::minutes(1))
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].transaction_id, txn_id("TXN1"));
        assert_eq!(hits[1].transaction_id, txn_id("TXN0"));
    }

    #[test]
    fn list_by_status_filters() {
        let log = InMemoryTransactionLog::new();
        let now = Utc::now();
        log.append(Transaction::deposit(txn_id("TXN1"), acc_no("ACC1"), Decimal::ONE, "d", now))
            .unwrap();
        log.append(Transaction::transfer(
            txn_id("TXN2"),
            acc_no("ACC1"),
            acc_no("ACC2"),
            Decimal::ONE,
            "t",
            TransactionStatus::Failed,
            now,
        ))
        .unwrap();

        let failed = log.list_by_status(TransactionStatus::Failed).unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].transaction_id, txn_id("TXN2"));
        assert!(log.list_by_status(TransactionStatus::Pending).unwrap().is_empty());
    }
}
