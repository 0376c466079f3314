//! Pooled Fund Protocol Implementation
//!
//! Users invest the base currency into a pooled fund and receive accounting
//! tokens at a fixed rate; a single operator can withdraw treasury funds and
//! mint tokens manually for fiat contributors. This crate holds the client
//! side of that protocol: state snapshots, derived metrics, pre-flight
//! validation, and ledger call construction.

pub mod access;
pub mod calculator;
pub mod calls;
pub mod fetch;
pub mod state;
pub mod validate;

// Re-exports
pub use access::is_operator;
pub use calculator::{
    contribution_issued_tokens, expected_issuance, manually_issued_tokens, ownership_percent,
    remaining_to_target,
};
pub use calls::LedgerCall;
pub use fetch::fetch_fund_state;
pub use state::{FundMetrics, FundState, InvestPreview, MintRemainingPreview};
pub use validate::{parse_amount, parse_invest, parse_mint_manual, parse_withdraw, ValidationError};
