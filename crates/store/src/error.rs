//! Store-level errors (infrastructure faults, not business rejections).

use thiserror::Error;

/// Error raised by an account store or transaction log implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with an existing key. Identifiers are never
    /// reused, so this indicates a generator fault or a caller bug.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A shared lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,

    /// The underlying backend was unreachable or failed mid-operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}
