//! Runtime configuration for the ledger core.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Tunables for money movement.
///
/// Transfer amounts must lie in `(min_transfer, max_transfer]`.
/// `max_cas_retries` bounds the conditional-update retry loop; once
/// exhausted, the operation fails with `UpdateFailed` instead of spinning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub min_transfer: Decimal,
    pub max_transfer: Decimal,
    pub max_cas_retries: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_transfer: Decimal::ONE,
            max_transfer: Decimal::from(1_000_000),
            max_cas_retries: 8,
        }
    }
}

impl LedgerConfig {
    /// Load from a JSON document; absent fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_bounds() {
        let config = LedgerConfig::default();
        assert_eq!(config.min_transfer, Decimal::ONE);
        assert_eq!(config.max_transfer, Decimal::from(1_000_000));
        assert_eq!(config.max_cas_retries, 8);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LedgerConfig::from_json_str(r#"{"max_transfer": "50000"}"#).unwrap();
        assert_eq!(config.max_transfer, Decimal::from(50_000));
        assert_eq!(config.min_transfer, Decimal::ONE);
        assert_eq!(config.max_cas_retries, 8);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(LedgerConfig::from_json_str("{not json").is_err());
    }
}
