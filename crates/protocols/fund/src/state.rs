//! Fund State Types
//!
//! Snapshot and derived-metric structures. A snapshot is a read-through view
//! of ledger truth: it is never mutated locally, only replaced by a fresh
//! fetch.

use coffer_core::MinorUnits;

use crate::calculator;

/// Point-in-time view of the fund's accounting, all amounts in minor units.
///
/// Each field is fetched independently; `None` means that read failed and the
/// figure should be shown as unavailable rather than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundState {
    /// Total accounting tokens issued
    pub total_supply: Option<MinorUnits>,
    /// Coins currently held by the treasury
    pub treasury_balance: Option<MinorUnits>,
    /// Coins contributed through investments since inception
    pub total_contributed: Option<MinorUnits>,
    /// Token balance of the connected identity (absent when disconnected)
    pub caller_balance: Option<MinorUnits>,
}

/// Quantities derived from a `FundState` snapshot.
///
/// Absent snapshot fields are treated as zero here; the raw snapshot keeps
/// the distinction for display purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundMetrics {
    /// Caller's share of total supply, percent with two decimal places
    pub ownership_pct: f64,
    /// Tokens attributable to coin contributions
    pub contribution_issued_tokens: MinorUnits,
    /// Tokens issued outside the contribution path (operator mints).
    /// Can go slightly negative from rounding noise; reported as-is.
    pub manually_issued_tokens: i128,
    /// Coins still needed to reach the funding target
    pub remaining_to_target: MinorUnits,
    /// Tokens a "mint remaining" operation would issue
    pub remaining_tokens: MinorUnits,
    /// The configured funding target
    pub funding_target: MinorUnits,
}

impl FundMetrics {
    pub fn derive(state: &FundState, funding_target: MinorUnits) -> Self {
        let supply = state.total_supply.unwrap_or(0);
        let contributed = state.total_contributed.unwrap_or(0);
        let caller = state.caller_balance.unwrap_or(0);

        let remaining = calculator::remaining_to_target(contributed, funding_target);

        Self {
            ownership_pct: calculator::ownership_percent(caller, supply),
            contribution_issued_tokens: calculator::contribution_issued_tokens(contributed),
            manually_issued_tokens: calculator::manually_issued_tokens(supply, contributed),
            remaining_to_target: remaining,
            remaining_tokens: calculator::expected_issuance(remaining),
            funding_target,
        }
    }
}

/// Preview of an investment before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestPreview {
    /// Coins to deposit, minor units
    pub amount: MinorUnits,
    /// Tokens the ledger is expected to issue, minor units
    pub tokens_received: MinorUnits,
}

impl InvestPreview {
    pub fn for_amount(amount: MinorUnits) -> Self {
        Self {
            amount,
            tokens_received: calculator::expected_issuance(amount),
        }
    }
}

/// Operator preview: what a "mint remaining allocation" would issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRemainingPreview {
    pub contributed: MinorUnits,
    pub funding_target: MinorUnits,
    pub remaining_coins: MinorUnits,
    pub tokens_to_mint: MinorUnits,
}

impl MintRemainingPreview {
    pub fn from_contributed(contributed: MinorUnits, funding_target: MinorUnits) -> Self {
        let remaining = calculator::remaining_to_target(contributed, funding_target);
        Self {
            contributed,
            funding_target,
            remaining_coins: remaining,
            tokens_to_mint: calculator::expected_issuance(remaining),
        }
    }
}
