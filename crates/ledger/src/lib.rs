//! `crestbank-ledger` — the money-movement core.
//!
//! Orchestrates deposit, withdraw, and transfer against the account store
//! and transaction log, enforcing balance invariants and the "mutate
//! balance + record transaction" pairing, with compensation on partial
//! transfer failure.

pub mod config;
pub mod error;
pub mod service;
pub mod view;

pub use config::LedgerConfig;
pub use error::{ErrorKind, LedgerError};
pub use service::LedgerService;
pub use view::{AccountView, BalanceView, TransferReceipt};
