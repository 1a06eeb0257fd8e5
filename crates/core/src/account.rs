use chrono::{DateTime, Utc};
use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::{AccountNumber, CustomerId};

/// Account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Checking,
    Savings,
    Business,
}

impl core::fmt::Display for AccountType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
            AccountType::Business => "BUSINESS",
        };
        f.write_str(s)
    }
}

impl FromStr for AccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CHECKING" => Ok(AccountType::Checking),
            "SAVINGS" => Ok(AccountType::Savings),
            "BUSINESS" => Ok(AccountType::Business),
            other => Err(DomainError::InvalidAccountType(other.to_string())),
        }
    }
}

/// A customer account holding a balance.
///
/// Owned exclusively by the account store; the balance is mutated only
/// through the store's conditional update, driven by the ledger core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_number: AccountNumber,
    pub customer_id: CustomerId,
    pub balance: Decimal,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Account {
    /// Open a new active account.
    ///
    /// The caller is responsible for rejecting a negative initial balance
    /// before constructing the entity.
    pub fn open(
        account_number: AccountNumber,
        customer_id: CustomerId,
        account_type: AccountType,
        initial_balance: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            account_number,
            customer_id,
            balance: initial_balance,
            account_type,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Whether this account may participate in money movements.
    pub fn can_transact(&self) -> bool {
        self.is_active
    }
}
