use std::sync::Arc;

use rust_decimal::Decimal;

use crestbank_core::{Account, AccountNumber, CustomerId};

use crate::error::StoreError;

/// Keyed store of account records.
///
/// The conditional balance update is the concurrency primitive the ledger
/// core relies on; the trait deliberately exposes **no** unconditional
/// set-balance (read-then-blind-write is the lost-update defect this design
/// exists to prevent).
///
/// ## Conditional update semantics
///
/// `compare_and_set_balance` applies `new` only if the stored balance still
/// equals `expected` **and** the account is active, refreshing `updated_at`
/// when it applies. Returning `Ok(false)` means the check failed (stale
/// read, or the account was deactivated concurrently) and nothing changed;
/// the caller re-reads and retries or gives up.
pub trait AccountStore: Send + Sync {
    /// Look up an account by number.
    fn get(&self, account: &AccountNumber) -> Result<Option<Account>, StoreError>;

    /// Insert a new account record. Fails with `DuplicateKey` if the
    /// account number is already taken.
    fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Conditionally replace the balance. See the trait docs for semantics.
    fn compare_and_set_balance(
        &self,
        account: &AccountNumber,
        expected: Decimal,
        new: Decimal,
    ) -> Result<bool, StoreError>;

    /// Clear the active flag (soft-deactivation; the record is kept).
    /// Returns whether an account with that number existed.
    fn deactivate(&self, account: &AccountNumber) -> Result<bool, StoreError>;

    /// All accounts owned by a customer.
    fn list_by_customer(&self, customer: &CustomerId) -> Result<Vec<Account>, StoreError>;

    /// All accounts whose active flag is set.
    fn list_active(&self) -> Result<Vec<Account>, StoreError>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn get(&self, account: &AccountNumber) -> Result<Option<Account>, StoreError> {
        (**self).get(account)
    }

    fn create(&self, account: Account) -> Result<Account, StoreError> {
        (**self).create(account)
    }

    fn compare_and_set_balance(
        &self,
        account: &AccountNumber,
        expected: Decimal,
        new: Decimal,
    ) -> Result<bool, StoreError> {
        (**self).compare_and_set_balance(account, expected, new)
    }

    fn deactivate(&self, account: &AccountNumber) -> Result<bool, StoreError> {
        (**self).deactivate(account)
    }

    fn list_by_customer(&self, customer: &CustomerId) -> Result<Vec<Account>, StoreError> {
        (**self).list_by_customer(customer)
    }

    fn list_active(&self) -> Result<Vec<Account>, StoreError> {
        (**self).list_active()
    }
}
