//! Moving-average cost calculations.
//!
//! All functions are pure; the persistence boundary locks the stock row
//! and applies the returned level inside its transaction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// On-hand quantity and moving-average unit cost of one (product, branch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// On-hand quantity. May be negative (oversell/over-return permitted).
    pub quantity: Decimal,
    /// Moving-average unit cost.
    pub avg_cost: Decimal,
}

impl StockLevel {
    /// An empty stock row (zero on hand, zero cost).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            quantity: Decimal::ZERO,
            avg_cost: Decimal::ZERO,
        }
    }
}

/// Applies an inbound purchase receipt, revising the moving average:
/// `((old_qty * old_avg) + (qty * unit_price)) / (old_qty + qty)`.
///
/// Zero or negative `qty` is a no-op. When prior oversell has driven the
/// on-hand to `-qty` or below, the weighted average is undefined or
/// dominated by the negative position; the cost basis restarts at the
/// incoming unit price.
#[must_use]
pub fn receive(current: StockLevel, qty: Decimal, unit_price: Decimal) -> StockLevel {
    if qty <= Decimal::ZERO {
        return current;
    }

    let new_qty = current.quantity + qty;
    let avg_cost = if new_qty <= Decimal::ZERO {
        unit_price
    } else {
        let prior_value = current.quantity.max(Decimal::ZERO) * current.avg_cost;
        let incoming_value = qty * unit_price;
        let base_qty = current.quantity.max(Decimal::ZERO) + qty;
        ((prior_value + incoming_value) / base_qty).round_dp(4)
    };

    StockLevel {
        quantity: new_qty,
        avg_cost,
    }
}

/// Applies an outbound movement (sale, return to vendor, claim) at the
/// current average cost.
///
/// Decrements without clamping at zero - negative on-hand is permitted by
/// design. The average cost is never revised on outbound legs. Returns the
/// new level and the unit cost in effect, for the caller's COGS or
/// price-variance posting.
#[must_use]
pub fn consume(current: StockLevel, qty: Decimal) -> (StockLevel, Decimal) {
    let level = StockLevel {
        quantity: current.quantity - qty,
        avg_cost: current.avg_cost,
    };
    (level, current.avg_cost)
}

/// Applies an inbound customer-return restock at the current average cost.
///
/// Quantity comes back; the average is not revised (only purchase receipts
/// do that).
#[must_use]
pub fn restock(current: StockLevel, qty: Decimal) -> StockLevel {
    StockLevel {
        quantity: current.quantity + qty,
        avg_cost: current.avg_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_receive_weighted_average() {
        let level = receive(StockLevel::empty(), dec!(10), dec!(100));
        assert_eq!(level.quantity, dec!(10));
        assert_eq!(level.avg_cost, dec!(100));

        let level = receive(level, dec!(10), dec!(200));
        assert_eq!(level.quantity, dec!(20));
        assert_eq!(level.avg_cost, dec!(150.00));
    }

    #[test]
    fn test_consume_leaves_average_unchanged() {
        let level = receive(StockLevel::empty(), dec!(10), dec!(100));
        let level = receive(level, dec!(10), dec!(200));

        let (level, cost_used) = consume(level, dec!(5));
        assert_eq!(cost_used, dec!(150.00));
        assert_eq!(level.quantity, dec!(15));
        assert_eq!(level.avg_cost, dec!(150.00));
    }

    #[test]
    fn test_consume_allows_negative_quantity() {
        let level = receive(StockLevel::empty(), dec!(3), dec!(50));
        // Allow negative: just decrement, no available-qty check.
        let (level, _) = consume(level, dec!(10));
        assert_eq!(level.quantity, dec!(-7));
        assert_eq!(level.avg_cost, dec!(50));
    }

    #[test]
    fn test_receive_non_positive_qty_is_noop() {
        let level = receive(StockLevel::empty(), dec!(10), dec!(100));
        assert_eq!(receive(level, dec!(0), dec!(500)), level);
        assert_eq!(receive(level, dec!(-4), dec!(500)), level);
    }

    #[test]
    fn test_restock_keeps_average() {
        let level = receive(StockLevel::empty(), dec!(10), dec!(100));
        let (level, _) = consume(level, dec!(4));

        let level = restock(level, dec!(2));
        assert_eq!(level.quantity, dec!(8));
        assert_eq!(level.avg_cost, dec!(100));
    }

    #[test]
    fn test_receive_into_negative_restarts_cost_basis() {
        let (oversold, _) = consume(StockLevel::empty(), dec!(5));
        assert_eq!(oversold.quantity, dec!(-5));

        let level = receive(oversold, dec!(3), dec!(80));
        assert_eq!(level.quantity, dec!(-2));
        assert_eq!(level.avg_cost, dec!(80));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Outbound movements never change the average cost.
        #[test]
        fn prop_outbound_never_revises_average(
            receipts in prop::collection::vec((1i64..1000, 1i64..100_000), 1..10),
            out_qty in 1i64..10_000,
        ) {
            let mut level = StockLevel::empty();
            for (qty, price_cents) in receipts {
                level = receive(level, Decimal::from(qty), Decimal::new(price_cents, 2));
            }
            let before = level.avg_cost;

            let (after_consume, used) = consume(level, Decimal::from(out_qty));
            prop_assert_eq!(after_consume.avg_cost, before);
            prop_assert_eq!(used, before);

            let after_restock = restock(after_consume, Decimal::from(out_qty));
            prop_assert_eq!(after_restock.avg_cost, before);
        }

        /// Receiving at a single price always yields that price as average.
        #[test]
        fn prop_single_price_average_is_that_price(
            receipts in prop::collection::vec(1i64..1000, 1..10),
            price_cents in 1i64..100_000,
        ) {
            let price = Decimal::new(price_cents, 2);
            let mut level = StockLevel::empty();
            for qty in receipts {
                level = receive(level, Decimal::from(qty), price);
            }
            prop_assert_eq!(level.avg_cost, price);
        }

        /// The average always stays within the min/max of receipt prices.
        #[test]
        fn prop_average_bounded_by_prices(
            receipts in prop::collection::vec((1i64..1000, 1i64..100_000), 2..10),
        ) {
            let mut level = StockLevel::empty();
            let mut lo = Decimal::MAX;
            let mut hi = Decimal::MIN;
            for (qty, price_cents) in receipts {
                let price = Decimal::new(price_cents, 2);
                lo = lo.min(price);
                hi = hi.max(price);
                level = receive(level, Decimal::from(qty), price);
            }
            prop_assert!(level.avg_cost >= lo);
            prop_assert!(level.avg_cost <= hi);
        }
    }
}
