//! Decimal-string conversion for minor-unit amounts
//!
//! The ledger stores every amount as an integer count of minor units
//! (10^18 per whole coin). Humans type decimal strings. Conversion happens
//! here, in pure integer arithmetic, and only at the boundary. Amounts are
//! never held as floats.

use thiserror::Error;

use crate::types::constants::MINOR_UNITS_PER_COIN;
use crate::MinorUnits;

/// Decimal places of the minor-unit representation
pub const COIN_DECIMALS: u32 = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("empty amount")]
    Empty,

    #[error("not a decimal amount: {0}")]
    Invalid(String),

    #[error("too many decimal places (max {COIN_DECIMALS}): {0}")]
    TooPrecise(String),

    #[error("amount out of range: {0}")]
    Overflow(String),
}

/// Parse a human decimal string ("1.5", "0.01", "1000000") into minor units.
///
/// Accepts only unsigned decimal notation; rejects anything with more than
/// 18 fractional digits rather than silently rounding.
pub fn parse_units(raw: &str) -> Result<MinorUnits, UnitsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, f),
        None => (raw, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitsError::Invalid(raw.to_string()));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(UnitsError::Invalid(raw.to_string()));
    }
    if frac_part.len() > COIN_DECIMALS as usize {
        return Err(UnitsError::TooPrecise(raw.to_string()));
    }

    let whole: MinorUnits = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| UnitsError::Overflow(raw.to_string()))?
    };

    let scaled = whole
        .checked_mul(MINOR_UNITS_PER_COIN)
        .ok_or_else(|| UnitsError::Overflow(raw.to_string()))?;

    let frac: MinorUnits = if frac_part.is_empty() {
        0
    } else {
        let digits: MinorUnits = frac_part
            .parse()
            .map_err(|_| UnitsError::Invalid(raw.to_string()))?;
        digits * 10u128.pow(COIN_DECIMALS - frac_part.len() as u32)
    };

    scaled
        .checked_add(frac)
        .ok_or_else(|| UnitsError::Overflow(raw.to_string()))
}

/// Format minor units back into a human decimal string.
///
/// Trailing fractional zeros are trimmed; whole amounts render without a
/// decimal point ("5", not "5.000000000000000000").
pub fn format_units(amount: MinorUnits) -> String {
    let whole = amount / MINOR_UNITS_PER_COIN;
    let frac = amount % MINOR_UNITS_PER_COIN;

    if frac == 0 {
        return whole.to_string();
    }

    let mut frac_str = format!("{:018}", frac);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{}.{}", whole, frac_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole() {
        assert_eq!(parse_units("1").unwrap(), MINOR_UNITS_PER_COIN);
        assert_eq!(parse_units("5").unwrap(), 5 * MINOR_UNITS_PER_COIN);
        assert_eq!(parse_units("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(parse_units("0.01").unwrap(), MINOR_UNITS_PER_COIN / 100);
        assert_eq!(
            parse_units("1.5").unwrap(),
            MINOR_UNITS_PER_COIN + MINOR_UNITS_PER_COIN / 2
        );
        // Bare leading/trailing dot forms
        assert_eq!(parse_units(".5").unwrap(), MINOR_UNITS_PER_COIN / 2);
        assert_eq!(parse_units("2.").unwrap(), 2 * MINOR_UNITS_PER_COIN);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_units(""), Err(UnitsError::Empty));
        assert_eq!(parse_units("   "), Err(UnitsError::Empty));
        assert!(matches!(parse_units("abc"), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_units("-1"), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_units("1.2.3"), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_units("."), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_units("1,5"), Err(UnitsError::Invalid(_))));
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        // 19 fractional digits
        assert!(matches!(
            parse_units("0.0000000000000000001"),
            Err(UnitsError::TooPrecise(_))
        ));
        // Exactly 18 is fine (one minor unit)
        assert_eq!(parse_units("0.000000000000000001").unwrap(), 1);
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(60);
        assert!(matches!(parse_units(&huge), Err(UnitsError::Overflow(_))));
    }

    #[test]
    fn test_format_basic() {
        assert_eq!(format_units(0), "0");
        assert_eq!(format_units(MINOR_UNITS_PER_COIN), "1");
        assert_eq!(format_units(MINOR_UNITS_PER_COIN / 100), "0.01");
        assert_eq!(
            format_units(MINOR_UNITS_PER_COIN + MINOR_UNITS_PER_COIN / 2),
            "1.5"
        );
    }

    #[test]
    fn test_round_trip_representative_amounts() {
        for amount in ["0", "0.01", "1", "5", "1000000"] {
            let minor = parse_units(amount).unwrap();
            assert_eq!(format_units(minor), amount, "round trip of {}", amount);
        }
    }

    #[test]
    fn test_round_trip_single_minor_unit() {
        let s = format_units(1);
        assert_eq!(parse_units(&s).unwrap(), 1);
    }
}
