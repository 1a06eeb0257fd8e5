//! `crestbank-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage or
//! orchestration concerns): strongly-typed identifiers, the `Account` and
//! `Transaction` entities, and the domain error model.

pub mod account;
pub mod error;
pub mod id;
pub mod transaction;

pub use account::{Account, AccountType};
pub use error::{DomainError, DomainResult};
pub use id::{AccountNumber, CustomerId, TransactionId};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
