//! Core type definitions for Coffer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger identity (20 bytes, 0x-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check the expected wire format: "0x" followed by 40 hex characters.
    /// Case is not significant; identities may arrive in mixed case.
    pub fn is_well_formed(&self) -> bool {
        self.0
            .strip_prefix("0x")
            .map(|body| body.len() == 40 && hex::decode(body).is_ok())
            .unwrap_or(false)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction ID (32 bytes, hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl TxId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount in the ledger's indivisible minor units (10^18 per whole coin).
/// Both the base currency and the accounting token use this representation.
pub type MinorUnits = u128;

/// Constants
pub mod constants {
    use super::MinorUnits;

    /// Minor units per whole coin (the ledger's 18-decimal representation)
    pub const MINOR_UNITS_PER_COIN: MinorUnits = 1_000_000_000_000_000_000;

    /// Accounting tokens issued per whole coin contributed.
    ///
    /// Mirrors the rate configured in the ledger. Preview-only: confirmed
    /// operations are never validated or reconciled against this constant;
    /// the ledger's actual issuance is authoritative.
    pub const TOKENS_PER_COIN: u128 = 1000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_well_formed() {
        let id = Identity::new("0x7d0262f9dc4f014cbbffe8c6efdb2de509856aa4");
        assert!(id.is_well_formed());

        let mixed = Identity::new("0x7D0262F9dc4f014CBBffe8c6efdb2de509856AA4");
        assert!(mixed.is_well_formed());
    }

    #[test]
    fn test_identity_malformed() {
        assert!(!Identity::new("7d0262f9dc4f014cbbffe8c6efdb2de509856aa4").is_well_formed());
        assert!(!Identity::new("0x7d0262").is_well_formed());
        assert!(!Identity::new("0xzz0262f9dc4f014cbbffe8c6efdb2de509856aa4").is_well_formed());
        assert!(!Identity::new("").is_well_formed());
    }

    #[test]
    fn test_txid_display() {
        let tx = TxId::new("abc123");
        assert_eq!(tx.to_string(), "abc123");
        assert_eq!(tx.as_str(), "abc123");
    }
}
