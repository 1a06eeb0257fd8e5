//! `crestbank-store` — storage seams for the ledger core.
//!
//! Defines the [`AccountStore`] and [`TransactionLog`] traits the ledger
//! orchestrates against, in-memory implementations (tests/dev; a SQL
//! backend would implement the same traits), and the identifier
//! generators.

pub mod account_store;
pub mod error;
pub mod id_gen;
pub mod in_memory;
pub mod transaction_log;

pub use account_store::AccountStore;
pub use error::StoreError;
pub use id_gen::{AccountNumberGenerator, CustomerIdGenerator, TransactionIdGenerator};
pub use in_memory::{InMemoryAccountStore, InMemoryTransactionLog};
pub use transaction_log::TransactionLog;
