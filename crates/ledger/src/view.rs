//! Read-side views returned by ledger operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crestbank_core::{Account, AccountNumber, AccountType, CustomerId, TransactionId, TransactionStatus};

/// Post-operation snapshot of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountView {
    pub account_number: AccountNumber,
    pub customer_id: CustomerId,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            customer_id: account.customer_id,
            balance: account.balance,
            account_type: account.account_type,
            created_at: account.created_at,
            updated_at: account.updated_at,
            is_active: account.is_active,
        }
    }
}

/// Balance lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceView {
    pub account_number: AccountNumber,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub last_updated: DateTime<Utc>,
}

impl From<Account> for BalanceView {
    fn from(account: Account) -> Self {
        Self {
            account_number: account.account_number,
            balance: account.balance,
            account_type: account.account_type,
            last_updated: account.updated_at,
        }
    }
}

/// Outcome of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub transaction_id: TransactionId,
    pub from_account: AccountNumber,
    pub to_account: AccountNumber,
    pub amount: Decimal,
    pub description: String,
    pub from_balance: Decimal,
    pub to_balance: Decimal,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
}
