//! Pre-flight Validation
//!
//! Synchronous checks on user-entered parameters. Validation runs to
//! completion before any signer or ledger call; a failure here means the
//! operation was never submitted.

use coffer_core::units::parse_units;
use coffer_core::{Identity, MinorUnits};
use thiserror::Error;

use crate::calls::LedgerCall;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid recipient identity: {0:?}")]
    InvalidIdentity(String),
}

impl ValidationError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::MissingField(_) => "missing_field",
            Self::InvalidIdentity(_) => "invalid_identity",
        }
    }
}

/// Validate an investment and build its ledger call
pub fn parse_invest(amount: &str) -> Result<LedgerCall, ValidationError> {
    Ok(LedgerCall::Invest {
        value: parse_amount(amount)?,
    })
}

/// Validate a treasury withdrawal and build its ledger call
pub fn parse_withdraw(amount: &str) -> Result<LedgerCall, ValidationError> {
    Ok(LedgerCall::Withdraw {
        amount: parse_amount(amount)?,
    })
}

/// Validate a manual token issuance and build its ledger call.
///
/// Recipient, amount, and a non-empty reason are all required.
pub fn parse_mint_manual(
    recipient: &str,
    amount: &str,
    reason: &str,
) -> Result<LedgerCall, ValidationError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(ValidationError::MissingField("recipient"));
    }
    if amount.trim().is_empty() {
        return Err(ValidationError::MissingField("amount"));
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::MissingField("reason"));
    }

    let recipient = Identity::new(recipient);
    if !recipient.is_well_formed() {
        return Err(ValidationError::InvalidIdentity(
            recipient.as_str().to_string(),
        ));
    }

    Ok(LedgerCall::MintManual {
        recipient,
        amount: parse_amount(amount)?,
        reason: reason.to_string(),
    })
}

/// Parse a user-entered amount, requiring a strictly positive value.
pub fn parse_amount(raw: &str) -> Result<MinorUnits, ValidationError> {
    let amount =
        parse_units(raw).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if amount == 0 {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}
