//! Identifier generation.
//!
//! Account and transaction identifiers compose a millisecond timestamp with
//! a random suffix, so two concurrent generations never collide and no
//! shared counter has to be serialized. Customer identifiers keep the
//! legacy strictly-increasing `CUST` numbering; the read-then-increment
//! race of that scheme is closed with an atomic counter.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crestbank_core::{AccountNumber, CustomerId, DomainError, DomainResult, TransactionId};

const CUSTOMER_PREFIX: &str = "CUST";

/// Generates transaction identifiers: `TXN{millis}{8-char random suffix}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionIdGenerator;

impl TransactionIdGenerator {
    pub fn next(&self) -> TransactionId {
        let millis = Utc::now().timestamp_millis();
        let suffix = random_suffix(8);
        TransactionId::new(format!("TXN{millis}{suffix}"))
    }
}

/// Generates account numbers: `ACC{millis}{6-char random suffix}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccountNumberGenerator;

impl AccountNumberGenerator {
    pub fn next(&self) -> AccountNumber {
        let millis = Utc::now().timestamp_millis();
        let suffix = random_suffix(6);
        AccountNumber::new(format!("ACC{millis}{suffix}"))
    }
}

/// Generates customer identifiers: `CUST` + zero-padded increasing number.
///
/// Seeded from the last issued identifier; issuing is a single atomic
/// increment, safe under concurrent callers.
#[derive(Debug)]
pub struct CustomerIdGenerator {
    last: AtomicU32,
}

impl CustomerIdGenerator {
    /// Seed the generator from the last issued identifier, e.g. `CUST0042`.
    pub fn from_last_issued(last_customer_id: &str) -> DomainResult<Self> {
        let numeric = last_customer_id
            .strip_prefix(CUSTOMER_PREFIX)
            .ok_or_else(|| {
                DomainError::invalid_id(format!("not a customer id: {last_customer_id}"))
            })?;
        let last: u32 = numeric.parse().map_err(|_| {
            DomainError::invalid_id(format!("customer id suffix is not numeric: {numeric}"))
        })?;
        Ok(Self {
            last: AtomicU32::new(last),
        })
    }

    pub fn next_id(&self) -> CustomerId {
        let n = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        CustomerId::new(format!("{CUSTOMER_PREFIX}{n:04}"))
    }
}

fn random_suffix(len: usize) -> String {
    let mut s = Uuid::new_v4().simple().to_string();
    s.truncate(len);
    s.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    #[test]
    fn transaction_ids_carry_the_prefix() {
        let id = TransactionIdGenerator.next();
        assert!(id.as_str().starts_with("TXN"));
        let acc = AccountNumberGenerator.next();
        assert!(acc.as_str().starts_with("ACC"));
    }

    #[test]
    fn transaction_ids_are_unique_under_concurrency() {
        let seen = Arc::new(Mutex::new(HashSet::new()));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seen = seen.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1250 {
                    let id = TransactionIdGenerator.next();
                    assert!(seen.lock().unwrap().insert(id));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(seen.lock().unwrap().len(), 10_000);
    }

    #[test]
    fn customer_ids_increase_from_the_seed() {
        let generator = CustomerIdGenerator::from_last_issued("CUST0007").unwrap();
        assert_eq!(generator.next_id().as_str(), "CUST0008");
        assert_eq!(generator.next_id().as_str(), "CUST0009");
    }

    #[test]
    fn customer_seed_must_match_the_scheme() {
        assert!(CustomerIdGenerator::from_last_issued("USR0007").is_err());
        assert!(CustomerIdGenerator::from_last_issued("CUSTX").is_err());
    }

    #[test]
    fn customer_ids_are_unique_under_concurrency() {
        let generator = Arc::new(CustomerIdGenerator::from_last_issued("CUST0000").unwrap());
        let seen = Arc::new(Mutex::new(HashSet::new()));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let generator = generator.clone();
            let seen = seen.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..250 {
                    assert!(seen.lock().unwrap().insert(generator.next_id()));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(seen.lock().unwrap().len(), 1000);
    }
}
