use chrono::{DateTime, Utc};
use core::str::FromStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::{AccountNumber, TransactionId};

/// Movement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Transfer,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
            TransactionKind::Transfer => "TRANSFER",
        };
        f.write_str(s)
    }
}

/// Transaction status lifecycle.
///
/// `Pending` is the only non-terminal status; a terminal status is never
/// overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }

    /// Whether a record in `self` may transition to `next`.
    ///
    /// Only `Pending` records move, and only to a terminal status.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        self == TransactionStatus::Pending && next.is_terminal()
    }
}

impl core::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
            TransactionStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

impl FromStr for TransactionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "FAILED" => Ok(TransactionStatus::Failed),
            "CANCELLED" => Ok(TransactionStatus::Cancelled),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

/// An immutable movement record.
///
/// A deposit has no source, a withdrawal has no destination, a transfer has
/// both. Core fields never change after creation; only `status` transitions,
/// and only through the transaction log's status-update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub from_account: Option<AccountNumber>,
    pub to_account: Option<AccountNumber>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: String,
    pub transaction_date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// A completed deposit into `to_account`.
    pub fn deposit(
        transaction_id: TransactionId,
        to_account: AccountNumber,
        amount: Decimal,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            from_account: None,
            to_account: Some(to_account),
            amount,
            kind: TransactionKind::Deposit,
            description: description.into(),
            transaction_date: now,
            status: TransactionStatus::Completed,
        }
    }

    /// A completed withdrawal out of `from_account`.
    pub fn withdrawal(
        transaction_id: TransactionId,
        from_account: AccountNumber,
        amount: Decimal,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            from_account: Some(from_account),
            to_account: None,
            amount,
            kind: TransactionKind::Withdraw,
            description: description.into(),
            transaction_date: now,
            status: TransactionStatus::Completed,
        }
    }

    /// A transfer between two accounts.
    ///
    /// The status is supplied by the caller: completed transfers and failed
    /// attempts are both recorded.
    pub fn transfer(
        transaction_id: TransactionId,
        from_account: AccountNumber,
        to_account: AccountNumber,
        amount: Decimal,
        description: impl Into<String>,
        status: TransactionStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            from_account: Some(from_account),
            to_account: Some(to_account),
            amount,
            kind: TransactionKind::Transfer,
            description: description.into(),
            transaction_date: now,
            status,
        }
    }

    /// Whether `account` appears on either side of this record.
    pub fn involves(&self, account: &AccountNumber) -> bool {
        self.from_account.as_ref() == Some(account) || self.to_account.as_ref() == Some(account)
    }
}
