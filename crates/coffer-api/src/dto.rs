//! Data Transfer Objects for API requests and responses
//!
//! Amounts cross this boundary as decimal strings of minor units; human
//! formatting is the frontend's job.

use coffer_core::units::format_units;
use coffer_core::MinorUnits;
use fund::{FundMetrics, FundState, MintRemainingPreview};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

/// Session status response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub connected: bool,
    pub identity: Option<String>,
    /// Whether the connected identity passes the operator gate
    pub is_operator: bool,
}

/// Connect request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub identity: String,
}

/// Fund snapshot response. Absent fields mean the corresponding ledger read
/// failed and the figure should be shown as unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundStateResponse {
    pub total_supply: Option<String>,
    pub treasury_balance: Option<String>,
    pub total_contributed: Option<String>,
    pub caller_balance: Option<String>,
}

impl From<FundState> for FundStateResponse {
    fn from(state: FundState) -> Self {
        Self {
            total_supply: state.total_supply.map(minor_string),
            treasury_balance: state.treasury_balance.map(minor_string),
            total_contributed: state.total_contributed.map(minor_string),
            caller_balance: state.caller_balance.map(minor_string),
        }
    }
}

/// Derived metrics response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundMetricsResponse {
    /// Percent with two decimal places
    pub ownership_pct: f64,
    pub contribution_issued_tokens: String,
    /// Signed: can go slightly negative from rounding noise
    pub manually_issued_tokens: String,
    pub remaining_to_target: String,
    pub remaining_tokens: String,
    pub funding_target: String,
}

impl From<FundMetrics> for FundMetricsResponse {
    fn from(metrics: FundMetrics) -> Self {
        Self {
            ownership_pct: metrics.ownership_pct,
            contribution_issued_tokens: minor_string(metrics.contribution_issued_tokens),
            manually_issued_tokens: metrics.manually_issued_tokens.to_string(),
            remaining_to_target: minor_string(metrics.remaining_to_target),
            remaining_tokens: minor_string(metrics.remaining_tokens),
            funding_target: minor_string(metrics.funding_target),
        }
    }
}

/// Investment preview request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestPreviewRequest {
    /// Human decimal amount in whole coins
    pub amount: String,
}

/// Investment preview response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestPreviewResponse {
    pub amount: String,
    pub tokens_received: String,
    /// Human-formatted token count for display ("1500")
    pub tokens_received_display: String,
}

/// Mint-remaining preview response (operator only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRemainingPreviewResponse {
    pub contributed: String,
    pub funding_target: String,
    pub remaining_coins: String,
    pub tokens_to_mint: String,
    pub tokens_to_mint_display: String,
}

impl From<MintRemainingPreview> for MintRemainingPreviewResponse {
    fn from(preview: MintRemainingPreview) -> Self {
        Self {
            contributed: minor_string(preview.contributed),
            funding_target: minor_string(preview.funding_target),
            remaining_coins: minor_string(preview.remaining_coins),
            tokens_to_mint: minor_string(preview.tokens_to_mint),
            tokens_to_mint_display: format_units(preview.tokens_to_mint),
        }
    }
}

/// Invest request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestRequest {
    /// Human decimal amount in whole coins
    pub amount: String,
}

/// Withdraw request (operator only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub amount: String,
}

/// Manual mint request (operator only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub recipient: String,
    /// Human decimal token amount
    pub amount: String,
    pub reason: String,
}

/// Accepted submission response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub op_id: String,
    pub tx_id: String,
}

fn minor_string(amount: MinorUnits) -> String {
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_state_response_keeps_absent_fields() {
        let state = FundState {
            total_supply: Some(3000),
            treasury_balance: None,
            total_contributed: Some(3),
            caller_balance: None,
        };
        let dto = FundStateResponse::from(state);
        assert_eq!(dto.total_supply.as_deref(), Some("3000"));
        assert!(dto.treasury_balance.is_none());
    }

    #[test]
    fn test_metrics_response_serializes_camel_case() {
        let state = FundState {
            total_supply: Some(1000),
            treasury_balance: Some(1),
            total_contributed: Some(1),
            caller_balance: Some(100),
        };
        let dto = FundMetricsResponse::from(FundMetrics::derive(&state, 5));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("ownershipPct").is_some());
        assert!(json.get("remainingToTarget").is_some());
    }
}
