//! Fund Calculator
//!
//! Pure math over minor-unit amounts. No async, no ledger.
//!
//! The issuance rate is fixed: 1 coin contributed mints 1000 tokens. These
//! functions are previews of what the ledger will do, computed in integer
//! space; percentages are derived in integer hundredths before the final
//! float conversion.

use coffer_core::types::constants::TOKENS_PER_COIN;
use coffer_core::MinorUnits;

/// Caller's share of total supply as a percent with two decimal places.
///
/// Returns 0.0 if the supply is zero or absent.
pub fn ownership_percent(caller_balance: MinorUnits, total_supply: MinorUnits) -> f64 {
    if total_supply == 0 {
        return 0.0;
    }
    // Hundredths of a percent, round-half-up, all in integer space
    let hundredths = (caller_balance.saturating_mul(10_000) + total_supply / 2) / total_supply;
    hundredths as f64 / 100.0
}

/// Tokens the ledger will issue for a contribution of `invest_amount` coins.
pub fn expected_issuance(invest_amount: MinorUnits) -> MinorUnits {
    invest_amount.saturating_mul(TOKENS_PER_COIN)
}

/// Tokens attributable to coin contributions
pub fn contribution_issued_tokens(total_contributed: MinorUnits) -> MinorUnits {
    total_contributed.saturating_mul(TOKENS_PER_COIN)
}

/// Tokens issued outside the contribution path (operator mints).
///
/// Computed as supply minus contribution-issued tokens. A slightly negative
/// result can appear from rounding noise and is reported unchanged.
pub fn manually_issued_tokens(total_supply: MinorUnits, total_contributed: MinorUnits) -> i128 {
    total_supply as i128 - contribution_issued_tokens(total_contributed) as i128
}

/// Coins still needed to reach the funding target. Never negative.
pub fn remaining_to_target(total_contributed: MinorUnits, target: MinorUnits) -> MinorUnits {
    target.saturating_sub(total_contributed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_core::types::constants::MINOR_UNITS_PER_COIN;
    use coffer_core::units::{format_units, parse_units};

    #[test]
    fn test_ownership_zero_supply() {
        assert_eq!(ownership_percent(0, 0), 0.0);
        assert_eq!(ownership_percent(1_000_000, 0), 0.0);
    }

    #[test]
    fn test_ownership_basic() {
        // 250 of 2500 tokens -> 10%
        assert_eq!(
            ownership_percent(250 * MINOR_UNITS_PER_COIN, 2500 * MINOR_UNITS_PER_COIN),
            10.0
        );
        // Full ownership
        assert_eq!(
            ownership_percent(MINOR_UNITS_PER_COIN, MINOR_UNITS_PER_COIN),
            100.0
        );
    }

    #[test]
    fn test_ownership_two_decimal_places() {
        // 1 of 3 -> 33.33%, not 33.333...
        assert_eq!(
            ownership_percent(MINOR_UNITS_PER_COIN, 3 * MINOR_UNITS_PER_COIN),
            33.33
        );
        // 2 of 3 rounds up to 66.67%
        assert_eq!(
            ownership_percent(2 * MINOR_UNITS_PER_COIN, 3 * MINOR_UNITS_PER_COIN),
            66.67
        );
    }

    #[test]
    fn test_ownership_bounded() {
        let supply = 12_345 * MINOR_UNITS_PER_COIN;
        for balance in [0, 1, supply / 7, supply / 2, supply - 1, supply] {
            let pct = ownership_percent(balance, supply);
            assert!((0.0..=100.0).contains(&pct), "pct {} out of range", pct);
        }
    }

    #[test]
    fn test_expected_issuance() {
        assert_eq!(expected_issuance(0), 0);
        assert_eq!(
            expected_issuance(MINOR_UNITS_PER_COIN),
            1000 * MINOR_UNITS_PER_COIN
        );
        // 0.01 coins -> 10 tokens
        let amount = parse_units("0.01").unwrap();
        assert_eq!(format_units(expected_issuance(amount)), "10");
    }

    #[test]
    fn test_manually_issued() {
        // 3 coins contributed -> 3000 tokens; supply of 3500 means 500 manual
        assert_eq!(
            manually_issued_tokens(3500 * MINOR_UNITS_PER_COIN, 3 * MINOR_UNITS_PER_COIN),
            (500 * MINOR_UNITS_PER_COIN) as i128
        );
    }

    #[test]
    fn test_manually_issued_can_be_negative() {
        // Supply slightly below contribution-issued: rounding noise, not a crash
        let contributed = 3 * MINOR_UNITS_PER_COIN;
        let supply = 3000 * MINOR_UNITS_PER_COIN - 1;
        assert_eq!(manually_issued_tokens(supply, contributed), -1);
    }

    #[test]
    fn test_remaining_to_target() {
        let target = 5 * MINOR_UNITS_PER_COIN;
        assert_eq!(remaining_to_target(0, target), target);
        assert_eq!(
            remaining_to_target(3 * MINOR_UNITS_PER_COIN, target),
            2 * MINOR_UNITS_PER_COIN
        );
        // Never negative once the target is met or exceeded
        assert_eq!(remaining_to_target(target, target), 0);
        assert_eq!(remaining_to_target(7 * MINOR_UNITS_PER_COIN, target), 0);
    }

    #[test]
    fn test_remaining_allocation_preview() {
        // 3 of 5 coins contributed: 2 coins remain, worth 2000 tokens
        let contributed = parse_units("3").unwrap();
        let target = parse_units("5").unwrap();

        let remaining = remaining_to_target(contributed, target);
        assert_eq!(format_units(remaining), "2");
        assert_eq!(format_units(expected_issuance(remaining)), "2000");
    }
}
