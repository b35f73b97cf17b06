//! Adjustment domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary totals of a sale or purchase document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTotals {
    /// Sum of line amounts before discount and tax.
    pub subtotal: Decimal,
    /// Document-level discount.
    pub discount: Decimal,
    /// Tax amount.
    pub tax: Decimal,
    /// Grand total.
    pub total: Decimal,
}

impl DocTotals {
    /// Net goods value (subtotal minus discount).
    #[must_use]
    pub fn net_goods(&self) -> Decimal {
        self.subtotal - self.discount
    }
}

/// The three deltas between an old and a new set of document totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustmentDelta {
    /// Change in net goods value.
    pub goods: Decimal,
    /// Change in tax.
    pub tax: Decimal,
    /// Change in grand total.
    pub total: Decimal,
}

impl AdjustmentDelta {
    /// Computes the deltas from old to new totals.
    #[must_use]
    pub fn between(old: DocTotals, new: DocTotals) -> Self {
        Self {
            goods: new.net_goods() - old.net_goods(),
            tax: new.tax - old.tax,
            total: new.total - old.total,
        }
    }

    /// Sub-cent residue left after goods and tax (pushed into the
    /// variance/revenue leg so the entry balances by construction).
    #[must_use]
    pub fn residue(&self) -> Decimal {
        self.total - self.goods - self.tax
    }

    /// True when nothing changed.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.goods.is_zero() && self.tax.is_zero() && self.total.is_zero()
    }
}

/// Where the goods delta of a purchase adjustment is posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodsRoute {
    /// Nothing received yet: the inventory value itself is corrected.
    Inventory,
    /// Some or all quantity already received at the old price: the
    /// difference is a price variance expense.
    PriceVariance,
}

impl GoodsRoute {
    /// Chooses the route from the document's receiving state.
    #[must_use]
    pub const fn for_received(any_received: bool) -> Self {
        if any_received {
            Self::PriceVariance
        } else {
            Self::Inventory
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_delta_between() {
        let old = DocTotals {
            subtotal: dec!(1000),
            discount: dec!(0),
            tax: dec!(100),
            total: dec!(1100),
        };
        let new = DocTotals {
            subtotal: dec!(1200),
            discount: dec!(0),
            tax: dec!(120),
            total: dec!(1320),
        };

        let delta = AdjustmentDelta::between(old, new);
        assert_eq!(delta.goods, dec!(200));
        assert_eq!(delta.tax, dec!(20));
        assert_eq!(delta.total, dec!(220));
        assert_eq!(delta.residue(), dec!(0));
        assert!(!delta.is_zero());
    }

    #[test]
    fn test_discount_feeds_goods_delta() {
        let old = DocTotals {
            subtotal: dec!(500),
            discount: dec!(50),
            tax: dec!(45),
            total: dec!(495),
        };
        let new = DocTotals {
            subtotal: dec!(500),
            discount: dec!(100),
            tax: dec!(40),
            total: dec!(440),
        };

        let delta = AdjustmentDelta::between(old, new);
        assert_eq!(delta.goods, dec!(-50));
        assert_eq!(delta.tax, dec!(-5));
        assert_eq!(delta.total, dec!(-55));
    }

    #[test]
    fn test_goods_route() {
        assert_eq!(GoodsRoute::for_received(false), GoodsRoute::Inventory);
        assert_eq!(GoodsRoute::for_received(true), GoodsRoute::PriceVariance);
    }
}
