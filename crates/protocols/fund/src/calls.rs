//! Ledger Call Construction
//!
//! A `LedgerCall` is the exact mutating call handed to the signer: validated
//! parameters only, amounts already converted to minor units. Serialization
//! matches the signer's wire format (camelCase, amounts as decimal strings).

use coffer_core::units::format_units;
use coffer_core::{Identity, MinorUnits};
use serde::Serialize;

/// A validated mutating call against the fund ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum LedgerCall {
    /// Deposit coins; the ledger issues tokens at its configured rate
    Invest {
        #[serde(serialize_with = "amount_string")]
        value: MinorUnits,
    },
    /// Operator-only: withdraw coins from the treasury
    Withdraw {
        #[serde(serialize_with = "amount_string")]
        amount: MinorUnits,
    },
    /// Operator-only: issue tokens to a fiat contributor
    MintManual {
        recipient: Identity,
        #[serde(serialize_with = "amount_string")]
        amount: MinorUnits,
        reason: String,
    },
}

impl LedgerCall {
    /// Wire name of the call
    pub fn name(&self) -> &'static str {
        match self {
            Self::Invest { .. } => "invest",
            Self::Withdraw { .. } => "withdraw",
            Self::MintManual { .. } => "mintManual",
        }
    }

    /// Short human-readable summary for lifecycle reporting
    pub fn describe(&self) -> String {
        match self {
            Self::Invest { value } => format!("Invest {} coins", format_units(*value)),
            Self::Withdraw { amount } => format!("Withdraw {} coins", format_units(*amount)),
            Self::MintManual {
                recipient, amount, ..
            } => format!("Mint {} tokens to {}", format_units(*amount), recipient),
        }
    }
}

fn amount_string<S>(amount: &MinorUnits, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invest_wire_form() {
        let call = LedgerCall::Invest {
            value: 1_500_000_000_000_000_000,
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({"call": "invest", "value": "1500000000000000000"})
        );
    }

    #[test]
    fn test_mint_manual_wire_form() {
        let call = LedgerCall::MintManual {
            recipient: Identity::new("0xaa00000000000000000000000000000000000001"),
            amount: 2_000_000_000_000_000_000_000,
            reason: "Fiat payment - $2000".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "call": "mintManual",
                "recipient": "0xaa00000000000000000000000000000000000001",
                "amount": "2000000000000000000000",
                "reason": "Fiat payment - $2000"
            })
        );
    }

    #[test]
    fn test_describe() {
        let call = LedgerCall::Withdraw {
            amount: 2_000_000_000_000_000_000,
        };
        assert_eq!(call.name(), "withdraw");
        assert_eq!(call.describe(), "Withdraw 2 coins");
    }
}
