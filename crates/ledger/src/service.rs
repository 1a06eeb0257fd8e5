//! Ledger core orchestration.
//!
//! Stateless over `Arc`-shared stores: every operation reads account state,
//! computes the new balance, and applies it through the account store's
//! conditional update, then records the movement in the transaction log.
//! Cross-operation safety comes entirely from the store's compare-and-set;
//! the service holds no locks of its own.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crestbank_core::{
    Account, AccountNumber, AccountType, CustomerId, Transaction, TransactionId, TransactionStatus,
};
use crestbank_store::{
    AccountNumberGenerator, AccountStore, TransactionIdGenerator, TransactionLog,
};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::view::{AccountView, BalanceView, TransferReceipt};

const DEFAULT_TRANSFER_DESCRIPTION: &str = "Money Transfer";

/// Which way a single-account balance update moves money.
#[derive(Debug, Clone, Copy)]
enum Leg {
    Credit,
    Debit,
}

/// The money-movement core.
#[derive(Clone)]
pub struct LedgerService<A, T> {
    accounts: A,
    log: T,
    config: LedgerConfig,
    account_numbers: AccountNumberGenerator,
    transaction_ids: TransactionIdGenerator,
}

impl<A, T> LedgerService<A, T>
where
    A: AccountStore,
    T: TransactionLog,
{
    pub fn new(accounts: A, log: T, config: LedgerConfig) -> Self {
        Self {
            accounts,
            log,
            config,
            account_numbers: AccountNumberGenerator,
            transaction_ids: TransactionIdGenerator,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ---- account lifecycle ------------------------------------------------

    /// Open a new active account for `customer`.
    ///
    /// A positive initial balance is itself recorded as a completed deposit.
    pub fn open_account(
        &self,
        customer: CustomerId,
        account_type: AccountType,
        initial_balance: Option<Decimal>,
    ) -> Result<AccountView, LedgerError> {
        let initial_balance = initial_balance.unwrap_or(Decimal::ZERO);
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        let account_number = self.account_numbers.next();
        let account = Account::open(
            account_number.clone(),
            customer,
            account_type,
            initial_balance,
            Utc::now(),
        );
        let account = self.accounts.create(account)?;

        if initial_balance > Decimal::ZERO {
            self.log.append(Transaction::deposit(
                self.transaction_ids.next(),
                account_number.clone(),
                initial_balance,
                "Initial deposit",
                Utc::now(),
            ))?;
        }

        tracing::info!(
            "account opened: {} (customer {}, initial balance {})",
            account_number,
            account.customer_id,
            initial_balance
        );
        Ok(account.into())
    }

    /// Full view of an account (active or not).
    pub fn account(&self, account: &AccountNumber) -> Result<AccountView, LedgerError> {
        self.view_of(account)
    }

    /// Current balance of an account (active or not).
    pub fn balance(&self, account: &AccountNumber) -> Result<BalanceView, LedgerError> {
        let record = self
            .accounts
            .get(account)?
            .ok_or_else(|| LedgerError::AccountNotFound(account.clone()))?;
        Ok(record.into())
    }

    /// All accounts owned by `customer`.
    pub fn accounts_for_customer(
        &self,
        customer: &CustomerId,
    ) -> Result<Vec<AccountView>, LedgerError> {
        let accounts = self.accounts.list_by_customer(customer)?;
        Ok(accounts.into_iter().map(AccountView::from).collect())
    }

    /// Soft-deactivate an account; the record is kept.
    pub fn deactivate_account(&self, account: &AccountNumber) -> Result<(), LedgerError> {
        if !self.accounts.deactivate(account)? {
            return Err(LedgerError::AccountNotFound(account.clone()));
        }
        Ok(())
    }

    // ---- money movement ---------------------------------------------------

    /// Credit `amount` into an account and record the deposit.
    ///
    /// If the movement cannot be recorded, the credit is reversed before
    /// the error surfaces; a mutated balance never outlives a failed
    /// record.
    pub fn deposit(
        &self,
        account: &AccountNumber,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<AccountView, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        self.apply_leg(account, amount, Leg::Credit)?;
        if let Err(err) = self.log.append(Transaction::deposit(
            self.transaction_ids.next(),
            account.clone(),
            amount,
            description,
            Utc::now(),
        )) {
            self.compensate(account, amount, Leg::Debit);
            return Err(err.into());
        }

        tracing::info!("deposit completed: {} += {}", account, amount);
        self.view_of(account)
    }

    /// Debit `amount` out of an account and record the withdrawal.
    ///
    /// The balance check is evaluated against the same read the conditional
    /// update guards, so a concurrent withdrawal cannot pass against a
    /// stale balance and still apply. A recording failure reverses the
    /// debit, as for deposits.
    pub fn withdraw(
        &self,
        account: &AccountNumber,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<AccountView, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }

        self.apply_leg(account, amount, Leg::Debit)?;
        if let Err(err) = self.log.append(Transaction::withdrawal(
            self.transaction_ids.next(),
            account.clone(),
            amount,
            description,
            Utc::now(),
        )) {
            self.compensate(account, amount, Leg::Credit);
            return Err(err.into());
        }

        tracing::info!("withdrawal completed: {} -= {}", account, amount);
        self.view_of(account)
    }

    /// Move `amount` from one account to another.
    ///
    /// Once the mutation phase starts, the attempt always leaves a
    /// transaction record: COMPLETED with both legs applied, or FAILED with
    /// neither (the applied leg is compensated). If the record itself
    /// cannot be written, both legs are reversed before the error returns,
    /// so balances never stay mutated unrecorded. The transaction id is
    /// generated before any mutation so logs and retries correlate.
    pub fn transfer(
        &self,
        from: &AccountNumber,
        to: &AccountNumber,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<TransferReceipt, LedgerError> {
        if from == to {
            return Err(LedgerError::SameAccount);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        if amount <= self.config.min_transfer || amount > self.config.max_transfer {
            return Err(LedgerError::AmountOutOfBounds {
                amount,
                min: self.config.min_transfer,
                max: self.config.max_transfer,
            });
        }

        // Preconditions, checked before anything is mutated: both accounts
        // exist and are active, and the source covers the amount.
        let source = self.load_active(from)?;
        self.load_active(to)?;
        if source.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                available: source.balance,
                required: amount,
            });
        }

        let description = {
            let description = description.into();
            if description.trim().is_empty() {
                DEFAULT_TRANSFER_DESCRIPTION.to_string()
            } else {
                description
            }
        };
        let transaction_id = self.transaction_ids.next();

        match self.transfer_legs(from, to, amount) {
            Ok((from_balance, to_balance)) => {
                let record = match self.log.append(Transaction::transfer(
                    transaction_id.clone(),
                    from.clone(),
                    to.clone(),
                    amount,
                    description.clone(),
                    TransactionStatus::Completed,
                    Utc::now(),
                )) {
                    Ok(record) => record,
                    Err(log_err) => {
                        // both legs applied but nothing can be recorded:
                        // reverse the transfer rather than hold mutated
                        // balances with no record of the movement
                        tracing::error!(
                            "could not record transfer {}: {}",
                            transaction_id,
                            log_err
                        );
                        self.compensate(from, amount, Leg::Credit);
                        self.compensate(to, amount, Leg::Debit);
                        return Err(log_err.into());
                    }
                };
                tracing::info!(
                    "transfer completed: {} ({} -> {}, amount {})",
                    transaction_id,
                    from,
                    to,
                    amount
                );
                Ok(TransferReceipt {
                    transaction_id,
                    from_account: from.clone(),
                    to_account: to.clone(),
                    amount,
                    description,
                    from_balance,
                    to_balance,
                    status: record.status,
                    timestamp: record.transaction_date,
                })
            }
            Err(err) => {
                // The attempt entered the mutation phase; it must never be
                // silently dropped from the audit trail.
                tracing::error!("transfer {} failed: {}", transaction_id, err);
                if let Err(log_err) = self.log.append(Transaction::transfer(
                    transaction_id.clone(),
                    from.clone(),
                    to.clone(),
                    amount,
                    format!("FAILED: {err}"),
                    TransactionStatus::Failed,
                    Utc::now(),
                )) {
                    tracing::error!(
                        "could not record failed transfer {}: {}",
                        transaction_id,
                        log_err
                    );
                }
                Err(err)
            }
        }
    }

    // ---- query surface ----------------------------------------------------

    /// Look up a single movement record.
    pub fn transaction(&self, id: &TransactionId) -> Result<Transaction, LedgerError> {
        self.log
            .get(id)?
            .ok_or_else(|| LedgerError::TransactionNotFound(id.clone()))
    }

    /// Movement records touching an account, newest first.
    pub fn account_history(
        &self,
        account: &AccountNumber,
        limit: usize,
    ) -> Result<Vec<Transaction>, LedgerError> {
        if self.accounts.get(account)?.is_none() {
            return Err(LedgerError::AccountNotFound(account.clone()));
        }
        Ok(self.log.list_by_account(account, limit)?)
    }

    /// Movement records dated within `[start, end]`, newest first.
    pub fn transactions_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, LedgerError> {
        if start > end {
            return Err(LedgerError::InvalidDateRange);
        }
        Ok(self.log.list_by_date_range(start, end)?)
    }

    /// Movement records currently in `status`, newest first.
    pub fn transactions_with_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.log.list_by_status(status)?)
    }

    /// Transition a pending record to a terminal status. Returns whether a
    /// matching pending record was found and transitioned.
    pub fn update_transaction_status(
        &self,
        id: &TransactionId,
        status: TransactionStatus,
    ) -> Result<bool, LedgerError> {
        Ok(self.log.update_status(id, status)?)
    }

    // ---- internals --------------------------------------------------------

    fn view_of(&self, account: &AccountNumber) -> Result<AccountView, LedgerError> {
        let record = self
            .accounts
            .get(account)?
            .ok_or_else(|| LedgerError::AccountNotFound(account.clone()))?;
        Ok(record.into())
    }

    fn load_active(&self, account: &AccountNumber) -> Result<Account, LedgerError> {
        let record = self
            .accounts
            .get(account)?
            .ok_or_else(|| LedgerError::AccountNotFound(account.clone()))?;
        if !record.can_transact() {
            return Err(LedgerError::InactiveAccount(account.clone()));
        }
        Ok(record)
    }

    /// Apply one balance movement through the store's conditional update.
    ///
    /// Read, compute, compare-and-set; a lost race re-reads and retries up
    /// to the configured budget, then fails with `UpdateFailed`. A debit
    /// checks funds against the same read the update guards, so it can
    /// never drive the balance negative.
    fn apply_leg(
        &self,
        account: &AccountNumber,
        amount: Decimal,
        leg: Leg,
    ) -> Result<Decimal, LedgerError> {
        for attempt in 0..self.config.max_cas_retries {
            let record = self.load_active(account)?;
            let new_balance = match leg {
                Leg::Credit => record.balance + amount,
                Leg::Debit => {
                    if record.balance < amount {
                        return Err(LedgerError::InsufficientBalance {
                            available: record.balance,
                            required: amount,
                        });
                    }
                    record.balance - amount
                }
            };
            if self
                .accounts
                .compare_and_set_balance(account, record.balance, new_balance)?
            {
                return Ok(new_balance);
            }
            tracing::warn!(
                "conditional update lost a race on {} (attempt {})",
                account,
                attempt + 1
            );
        }
        Err(LedgerError::UpdateFailed(account.clone()))
    }

    /// Apply both transfer legs in canonical ascending-account order, so
    /// opposing concurrent transfers on the same pair cannot circular-wait.
    /// If the second leg cannot be applied, the first is compensated.
    fn transfer_legs(
        &self,
        from: &AccountNumber,
        to: &AccountNumber,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        if from < to {
            let from_balance = self.apply_leg(from, amount, Leg::Debit)?;
            match self.apply_leg(to, amount, Leg::Credit) {
                Ok(to_balance) => Ok((from_balance, to_balance)),
                Err(err) => {
                    self.compensate(from, amount, Leg::Credit);
                    Err(err)
                }
            }
        } else {
            let to_balance = self.apply_leg(to, amount, Leg::Credit)?;
            match self.apply_leg(from, amount, Leg::Debit) {
                Ok(from_balance) => Ok((from_balance, to_balance)),
                Err(err) => {
                    self.compensate(to, amount, Leg::Debit);
                    Err(err)
                }
            }
        }
    }

    /// Reverse an applied leg after the other leg failed. A failure here is
    /// surfaced in the log only; the FAILED record written by the caller is
    /// the reconciliation trail.
    fn compensate(&self, account: &AccountNumber, amount: Decimal, leg: Leg) {
        if let Err(err) = self.apply_leg(account, amount, leg) {
            tracing::error!("compensation failed for {}: {}", account, err);
        }
    }
}
