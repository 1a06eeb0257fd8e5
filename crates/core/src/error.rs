//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures of the domain vocabulary
/// itself (identifier and enum parsing). Business-rule rejections and
/// storage faults live in the ledger and store crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (empty, or malformed for its scheme).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A transaction status string did not name a known status.
    #[error("invalid status: {0}. Valid statuses: PENDING, COMPLETED, FAILED, CANCELLED")]
    InvalidStatus(String),

    /// An account type string did not name a known type.
    #[error("invalid account type: {0}. Valid types: CHECKING, SAVINGS, BUSINESS")]
    InvalidAccountType(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
