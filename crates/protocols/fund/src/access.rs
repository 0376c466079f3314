//! Operator Access Gate
//!
//! Decides whether operator-only controls (withdraw, manual mint) are offered
//! to the connected identity. Advisory only: the ledger enforces its own
//! access control and remains the authority on whether a call succeeds.

use coffer_core::Identity;

/// Case-insensitive identity comparison.
///
/// Identities are hexadecimal and may arrive in mixed case, so a byte-exact
/// comparison would wrongly deny the operator.
pub fn is_operator(caller: &Identity, operator: &Identity) -> bool {
    caller.as_str().eq_ignore_ascii_case(operator.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERATOR: &str = "0x7d0262f9dc4f014cbbffe8c6efdb2de509856aa4";

    #[test]
    fn test_exact_match() {
        assert!(is_operator(
            &Identity::new(OPERATOR),
            &Identity::new(OPERATOR)
        ));
    }

    #[test]
    fn test_case_insensitive_match() {
        let checksummed = Identity::new("0x7D0262F9DC4F014CbbFFe8c6EfDb2dE509856Aa4");
        assert!(is_operator(&checksummed, &Identity::new(OPERATOR)));
    }

    #[test]
    fn test_different_identity_denied() {
        let other = Identity::new("0xaa00000000000000000000000000000000000001");
        assert!(!is_operator(&other, &Identity::new(OPERATOR)));
    }
}
