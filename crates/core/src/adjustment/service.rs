//! Adjustment line construction.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{AdjustmentDelta, DocTotals, GoodsRoute};
use crate::account::codes;
use crate::ledger::{Party, PostingLine};

/// Which side of the ledger a positive delta lands on.
#[derive(Debug, Clone, Copy)]
enum PositiveSide {
    Debit,
    Credit,
}

/// Computes the posting lines of delta adjustment entries.
pub struct AdjustmentService;

impl AdjustmentService {
    /// Builds the delta entry lines for a revised purchase bill.
    ///
    /// The goods delta routes to inventory (nothing received yet) or to the
    /// price-variance account (any quantity received); the tax delta to
    /// input VAT; accounts payable absorbs the opposite side, attributed to
    /// the vendor. Any sub-cent residue between the three deltas is pushed
    /// into the goods leg so the entry balances by construction.
    ///
    /// Returns `None` when nothing changed (no entry to post).
    #[must_use]
    pub fn bill_adjustment_lines(
        old: DocTotals,
        new: DocTotals,
        route: GoodsRoute,
        vendor_id: Option<Uuid>,
    ) -> Option<Vec<PostingLine>> {
        let delta = AdjustmentDelta::between(old, new);
        if delta.is_zero() {
            return None;
        }

        let goods_account = match route {
            GoodsRoute::Inventory => codes::INVENTORY,
            GoodsRoute::PriceVariance => codes::PURCHASE_PRICE_VARIANCE,
        };
        let goods_leg = delta.goods + delta.residue();

        let mut lines = Vec::with_capacity(3);
        push_signed(&mut lines, goods_account, goods_leg, PositiveSide::Debit, None);
        push_signed(
            &mut lines,
            codes::VAT_INPUT,
            delta.tax,
            PositiveSide::Debit,
            None,
        );
        push_signed(
            &mut lines,
            codes::ACCOUNTS_PAYABLE,
            delta.total,
            PositiveSide::Credit,
            vendor_id.map(Party::Vendor),
        );

        Some(lines)
    }

    /// Builds the delta entry lines for a revised sale.
    ///
    /// The goods delta routes to sales revenue, the tax delta to output
    /// VAT, and accounts receivable absorbs the opposite side, attributed
    /// to the customer. Residue lands in the revenue leg.
    ///
    /// Returns `None` when nothing changed.
    #[must_use]
    pub fn sale_adjustment_lines(
        old: DocTotals,
        new: DocTotals,
        customer_id: Option<Uuid>,
    ) -> Option<Vec<PostingLine>> {
        let delta = AdjustmentDelta::between(old, new);
        if delta.is_zero() {
            return None;
        }

        let revenue_leg = delta.goods + delta.residue();

        let mut lines = Vec::with_capacity(3);
        push_signed(
            &mut lines,
            codes::SALES_REVENUE,
            revenue_leg,
            PositiveSide::Credit,
            None,
        );
        push_signed(
            &mut lines,
            codes::VAT_OUTPUT,
            delta.tax,
            PositiveSide::Credit,
            None,
        );
        push_signed(
            &mut lines,
            codes::ACCOUNTS_RECEIVABLE,
            delta.total,
            PositiveSide::Debit,
            customer_id.map(Party::Customer),
        );

        Some(lines)
    }
}

/// Appends a line for a signed amount, swapping the side when negative and
/// skipping zero amounts.
fn push_signed(
    lines: &mut Vec<PostingLine>,
    account_code: &str,
    amount: Decimal,
    positive: PositiveSide,
    party: Option<Party>,
) {
    if amount.is_zero() {
        return;
    }

    let line = match (positive, amount > Decimal::ZERO) {
        (PositiveSide::Debit, true) | (PositiveSide::Credit, false) => {
            PostingLine::debit(account_code, amount.abs())
        }
        (PositiveSide::Credit, true) | (PositiveSide::Debit, false) => {
            PostingLine::credit(account_code, amount.abs())
        }
    };

    let line = match party {
        Some(p) => line.with_party(p),
        None => line,
    };
    lines.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerService;
    use rust_decimal_macros::dec;

    fn totals(subtotal: Decimal, discount: Decimal, tax: Decimal, total: Decimal) -> DocTotals {
        DocTotals {
            subtotal,
            discount,
            tax,
            total,
        }
    }

    #[test]
    fn test_bill_adjustment_fully_received() {
        // subtotal 1000 -> 1200, tax 100 -> 120, total 1100 -> 1320,
        // fully received: variance 200 dr, input VAT 20 dr, AP 220 cr.
        let vendor = Uuid::now_v7();
        let lines = AdjustmentService::bill_adjustment_lines(
            totals(dec!(1000), dec!(0), dec!(100), dec!(1100)),
            totals(dec!(1200), dec!(0), dec!(120), dec!(1320)),
            GoodsRoute::PriceVariance,
            Some(vendor),
        )
        .unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].account_code, codes::PURCHASE_PRICE_VARIANCE);
        assert_eq!(lines[0].debit, dec!(200));
        assert_eq!(lines[1].account_code, codes::VAT_INPUT);
        assert_eq!(lines[1].debit, dec!(20));
        assert_eq!(lines[2].account_code, codes::ACCOUNTS_PAYABLE);
        assert_eq!(lines[2].credit, dec!(220));
        assert_eq!(lines[2].party, Some(Party::Vendor(vendor)));

        let entry_totals = LedgerService::calculate_totals(&lines);
        assert!(entry_totals.is_balanced);
    }

    #[test]
    fn test_bill_adjustment_nothing_received_routes_to_inventory() {
        let lines = AdjustmentService::bill_adjustment_lines(
            totals(dec!(1000), dec!(0), dec!(100), dec!(1100)),
            totals(dec!(900), dec!(0), dec!(90), dec!(990)),
            GoodsRoute::Inventory,
            None,
        )
        .unwrap();

        // Totals decreased: inventory credited, AP debited.
        assert_eq!(lines[0].account_code, codes::INVENTORY);
        assert_eq!(lines[0].credit, dec!(100));
        assert_eq!(lines[1].account_code, codes::VAT_INPUT);
        assert_eq!(lines[1].credit, dec!(10));
        assert_eq!(lines[2].account_code, codes::ACCOUNTS_PAYABLE);
        assert_eq!(lines[2].debit, dec!(110));

        assert!(LedgerService::calculate_totals(&lines).is_balanced);
    }

    #[test]
    fn test_bill_adjustment_noop() {
        let same = totals(dec!(1000), dec!(0), dec!(100), dec!(1100));
        assert!(AdjustmentService::bill_adjustment_lines(
            same,
            same,
            GoodsRoute::PriceVariance,
            None
        )
        .is_none());
    }

    #[test]
    fn test_bill_adjustment_rounding_residue_lands_in_goods_leg() {
        // goods +10.00, tax +0.99, but the document total moved +11.00:
        // the extra cent goes into the variance leg, never left dangling.
        let lines = AdjustmentService::bill_adjustment_lines(
            totals(dec!(100.00), dec!(0), dec!(10.00), dec!(110.00)),
            totals(dec!(110.00), dec!(0), dec!(10.99), dec!(121.00)),
            GoodsRoute::PriceVariance,
            None,
        )
        .unwrap();

        assert_eq!(lines[0].debit, dec!(10.01));
        assert_eq!(lines[1].debit, dec!(0.99));
        assert_eq!(lines[2].credit, dec!(11.00));
        assert!(LedgerService::calculate_totals(&lines).is_balanced);
    }

    #[test]
    fn test_sale_adjustment_increase() {
        let customer = Uuid::now_v7();
        let lines = AdjustmentService::sale_adjustment_lines(
            totals(dec!(200), dec!(0), dec!(20), dec!(220)),
            totals(dec!(300), dec!(0), dec!(30), dec!(330)),
            Some(customer),
        )
        .unwrap();

        assert_eq!(lines[0].account_code, codes::SALES_REVENUE);
        assert_eq!(lines[0].credit, dec!(100));
        assert_eq!(lines[1].account_code, codes::VAT_OUTPUT);
        assert_eq!(lines[1].credit, dec!(10));
        assert_eq!(lines[2].account_code, codes::ACCOUNTS_RECEIVABLE);
        assert_eq!(lines[2].debit, dec!(110));
        assert_eq!(lines[2].party, Some(Party::Customer(customer)));

        assert!(LedgerService::calculate_totals(&lines).is_balanced);
    }

    #[test]
    fn test_sale_adjustment_decrease_swaps_sides() {
        let lines = AdjustmentService::sale_adjustment_lines(
            totals(dec!(300), dec!(0), dec!(30), dec!(330)),
            totals(dec!(200), dec!(0), dec!(20), dec!(220)),
            None,
        )
        .unwrap();

        assert_eq!(lines[0].debit, dec!(100));
        assert_eq!(lines[1].debit, dec!(10));
        assert_eq!(lines[2].credit, dec!(110));
        assert!(LedgerService::calculate_totals(&lines).is_balanced);
    }

    #[test]
    fn test_tax_only_change_has_no_goods_line() {
        let lines = AdjustmentService::bill_adjustment_lines(
            totals(dec!(1000), dec!(0), dec!(100), dec!(1100)),
            totals(dec!(1000), dec!(0), dec!(110), dec!(1110)),
            GoodsRoute::PriceVariance,
            None,
        )
        .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].account_code, codes::VAT_INPUT);
        assert_eq!(lines[0].debit, dec!(10));
        assert_eq!(lines[1].account_code, codes::ACCOUNTS_PAYABLE);
        assert_eq!(lines[1].credit, dec!(10));
        assert!(LedgerService::calculate_totals(&lines).is_balanced);
    }
}
