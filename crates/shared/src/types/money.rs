//! Money rounding helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All monetary amounts are `rust_decimal::Decimal`, compared and stored at
//! 2 decimal places.

use rust_decimal::Decimal;

/// Number of decimal places for monetary amounts.
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary amount to 2 decimal places (banker's rounding).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_DP)
}

/// Compares two monetary sums at 2-decimal precision.
///
/// This is the comparison the posting engine uses for its balance check:
/// two sums are considered equal when they round to the same cent.
#[must_use]
pub fn sums_balance(debit_total: Decimal, credit_total: Decimal) -> bool {
    round_money(debit_total) == round_money(credit_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_two_places() {
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
        assert_eq!(round_money(dec!(10.006)), dec!(10.01));
        assert_eq!(round_money(dec!(10)), dec!(10));
    }

    #[test]
    fn test_round_money_bankers() {
        // Midpoint rounds to even.
        assert_eq!(round_money(dec!(10.005)), dec!(10.00));
        assert_eq!(round_money(dec!(10.015)), dec!(10.02));
    }

    #[rstest]
    #[case(dec!(100), dec!(100), true)]
    #[case(dec!(100.004), dec!(100.001), true)]
    #[case(dec!(100.01), dec!(100.00), false)]
    #[case(dec!(0), dec!(0), true)]
    fn test_sums_balance(#[case] debit: Decimal, #[case] credit: Decimal, #[case] expected: bool) {
        assert_eq!(sums_balance(debit, credit), expected);
    }
}
