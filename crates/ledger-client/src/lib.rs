//! ledger-client: HTTP client for the fund ledger gateway
//!
//! The gateway is the read/write boundary to the external ledger: fund
//! figures, transaction status, and the investment event feed. This crate
//! performs no retries and no interpretation; callers decide re-fetch
//! cadence and how to degrade when a read fails.

pub mod signer;

use std::time::Duration;

use coffer_core::{Identity, LedgerConfig, LedgerError, MinorUnits, TxId};
use serde::{Deserialize, Serialize};

pub use signer::{SessionInfo, SignerClient};

/// Default timeout for gateway calls. Long enough for a slow gateway, short
/// enough to avoid perpetual spinners.
const LEDGER_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for ledger client operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Confirmation status of a submitted transaction, as reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed { reason: String },
}

/// One entry from the gateway's investment event feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEvent {
    pub investor: String,
    /// Coins contributed, minor units as a decimal string
    pub amount: String,
    /// Tokens issued for the contribution, minor units as a decimal string
    pub tokens_issued: String,
    pub tx_id: String,
}

/// High-level client for the ledger gateway
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    config: LedgerConfig,
}

impl LedgerClient {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(LEDGER_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::ApiError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    /// Get the current gateway configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Check if the gateway is reachable
    pub async fn is_online(&self) -> bool {
        self.total_supply().await.is_ok()
    }

    /// Total accounting tokens issued, minor units
    pub async fn total_supply(&self) -> Result<MinorUnits> {
        self.get_amount("/fund/total-supply", "totalSupply").await
    }

    /// Coins currently held by the fund treasury, minor units
    pub async fn treasury_balance(&self) -> Result<MinorUnits> {
        self.get_amount("/fund/treasury-balance", "treasuryBalance")
            .await
    }

    /// Coins contributed through investments since inception, minor units
    pub async fn total_contributed(&self) -> Result<MinorUnits> {
        self.get_amount("/fund/total-contributed", "totalContributed")
            .await
    }

    /// Token balance of an identity, minor units
    pub async fn balance_of(&self, identity: &Identity) -> Result<MinorUnits> {
        let endpoint = format!("/fund/balance/{}", identity);
        self.get_amount(&endpoint, "balance").await
    }

    /// Confirmation status of a transaction. `TxNotFound` while the gateway
    /// has not yet seen the transaction.
    pub async fn tx_status(&self, tx_id: &TxId) -> Result<TxStatus> {
        let endpoint = format!("/tx/{}", tx_id);
        let json = self
            .get_json_opt(&endpoint)
            .await?
            .ok_or_else(|| LedgerError::TxNotFound {
                tx_id: tx_id.to_string(),
            })?;

        let status = json
            .get("status")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LedgerError::MalformedResponse("missing status field".to_string()))?;

        match status {
            "pending" => Ok(TxStatus::Pending),
            "confirmed" => Ok(TxStatus::Confirmed),
            "failed" => {
                let reason = json
                    .get("reason")
                    .and_then(|v| v.as_str())
                    .unwrap_or("ledger rejected the call")
                    .to_string();
                Ok(TxStatus::Failed { reason })
            }
            other => Err(LedgerError::MalformedResponse(format!(
                "unknown transaction status: {}",
                other
            ))),
        }
    }

    /// Recent investment events, most recent first
    pub async fn recent_investments(&self, limit: u32) -> Result<Vec<InvestmentEvent>> {
        let endpoint = format!("/fund/investments?limit={}", limit);
        let json = self.get_json(&endpoint).await?;
        serde_json::from_value(json).map_err(|e| {
            LedgerError::MalformedResponse(format!("bad investment feed: {}", e))
        })
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn get_json(&self, endpoint: &str) -> Result<serde_json::Value> {
        self.get_json_opt(endpoint)
            .await?
            .ok_or_else(|| LedgerError::ApiError {
                message: format!("404 for {}", endpoint),
            })
    }

    /// Like `get_json`, but a 404 becomes `Ok(None)` so callers can give it
    /// endpoint-specific meaning.
    async fn get_json_opt(&self, endpoint: &str) -> Result<Option<serde_json::Value>> {
        let url = format!("{}{}", self.config.url.trim_end_matches('/'), endpoint);

        let mut request = self.http.get(&url);
        if !self.config.api_key.is_empty() {
            request = request.header("api_key", &self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                LedgerError::Unreachable {
                    url: self.config.url.clone(),
                }
            } else {
                LedgerError::ApiError {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::ApiError {
                message: format!("{} {}", status.as_u16(), body),
            });
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))
    }

    async fn get_amount(&self, endpoint: &str, field: &str) -> Result<MinorUnits> {
        let json = self.get_json(endpoint).await?;
        parse_amount_field(&json, field)
    }
}

/// Extract a minor-unit amount carried as a decimal string field.
fn parse_amount_field(json: &serde_json::Value, field: &str) -> Result<MinorUnits> {
    let raw = json
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| LedgerError::MalformedResponse(format!("missing field {}", field)))?;

    raw.parse::<MinorUnits>().map_err(|_| {
        LedgerError::MalformedResponse(format!("{} is not an integer amount: {}", field, raw))
    })
}
