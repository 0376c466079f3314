//! Configuration types for Coffer

use serde::{Deserialize, Serialize};

use crate::types::constants::MINOR_UNITS_PER_COIN;
use crate::MinorUnits;

/// Ledger gateway connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Gateway URL (e.g., "http://127.0.0.1:8545")
    pub url: String,

    /// API key for authenticated endpoints (optional)
    pub api_key: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            api_key: String::new(),
        }
    }
}

/// Wallet signer connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Signer service URL
    pub url: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8550".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger gateway settings
    pub ledger: LedgerConfig,

    /// Wallet signer settings
    pub signer: SignerConfig,

    /// The single identity allowed to withdraw treasury funds and mint
    /// tokens manually. Compared case-insensitively against the connected
    /// identity.
    pub operator: String,

    /// Funding target in whole coins
    pub funding_target_coins: u64,

    /// API server port
    pub api_port: u16,
}

impl AppConfig {
    /// Funding target converted to minor units
    pub fn funding_target(&self) -> MinorUnits {
        MinorUnits::from(self.funding_target_coins) * MINOR_UNITS_PER_COIN
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledger: LedgerConfig::default(),
            signer: SignerConfig::default(),
            operator: "0x7d0262f9dc4f014cbbffe8c6efdb2de509856aa4".to_string(),
            funding_target_coins: 5,
            api_port: 19720,
        }
    }
}
