//! Ledger error taxonomy.

use rust_decimal::Decimal;
use thiserror::Error;

use crestbank_core::{AccountNumber, TransactionId};
use crestbank_store::StoreError;

/// Broad failure category, for transport-level mapping by the API layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input; caught before any storage access.
    Validation,
    /// A referenced account or transaction does not exist.
    NotFound,
    /// A business rule rejected the operation (not a system fault).
    StateConflict,
    /// The conditional update never applied, or the store itself failed.
    StorageFailure,
}

/// Error returned by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    #[error("account is not active: {0}")]
    InactiveAccount(AccountNumber),

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("transfer amount {amount} outside bounds ({min}, {max}]")]
    AmountOutOfBounds {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("cannot transfer to the same account")]
    SameAccount,

    #[error("insufficient balance. Available: {available}, Required: {required}")]
    InsufficientBalance {
        available: Decimal,
        required: Decimal,
    },

    #[error("balance update failed for {0}")]
    UpdateFailed(AccountNumber),

    #[error("start date cannot be after end date")]
    InvalidDateRange,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// The failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidAmount
            | LedgerError::AmountOutOfBounds { .. }
            | LedgerError::SameAccount
            | LedgerError::InvalidDateRange => ErrorKind::Validation,
            LedgerError::AccountNotFound(_) | LedgerError::TransactionNotFound(_) => {
                ErrorKind::NotFound
            }
            LedgerError::InactiveAccount(_) | LedgerError::InsufficientBalance { .. } => {
                ErrorKind::StateConflict
            }
            LedgerError::UpdateFailed(_) | LedgerError::Store(_) => ErrorKind::StorageFailure,
        }
    }
}
