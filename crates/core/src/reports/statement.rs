//! Running-balance statement reconstruction.
//!
//! The core reusable report algorithm:
//!
//! 1. `opening` - `SUM(debit - credit)` over everything before the range
//! 2. `prior_delta` - the same sum over rows of the range strictly before
//!    the current page's first row, by `(effective_date, posting_no)` order
//! 3. walk the page rows in order, accumulating `running += debit - credit`
//!
//! Steps 1 and 2 are aggregate queries at the persistence boundary; the
//! walk happens here. The `(effective_date ASC, posting_no ASC)` compound
//! ordering is mandatory: `posting_no` is monotonically increasing and
//! breaks ties between same-instant postings, which makes the
//! reconstruction reproducible for any page size.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::Party;

/// One fetched posting row of a statement page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Posting id.
    pub posting_id: Uuid,
    /// Monotonic posting number (the ordering tie-break).
    pub posting_no: i64,
    /// Owning journal entry id.
    pub entry_id: Uuid,
    /// Effective timestamp: `COALESCE(posting.created_at,
    /// entry.entry_date, entry.created_at)`.
    pub effective_at: DateTime<Utc>,
    /// Entry memo.
    pub memo: Option<String>,
    /// Account code of the posting.
    pub account_code: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Party the posting is attributed to, if any.
    pub party: Option<Party>,
}

impl LedgerLine {
    /// Net movement of this line (debit minus credit).
    #[must_use]
    pub fn delta(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A statement row: a posting plus the running balance after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    /// The posting.
    pub line: LedgerLine,
    /// Running balance after this posting.
    pub balance: Decimal,
}

/// The balance carried into the current page: the range opening plus the
/// net movement of all in-range rows before the page.
#[must_use]
pub fn opening_for_page(opening: Decimal, prior_delta: Decimal) -> Decimal {
    opening + prior_delta
}

/// Walks one page of postings in order, emitting the running balance after
/// each row. Returns the rows and the closing balance of the page.
#[must_use]
pub fn walk_page(opening_for_page: Decimal, lines: Vec<LedgerLine>) -> (Vec<StatementRow>, Decimal) {
    let mut running = opening_for_page;
    let mut rows = Vec::with_capacity(lines.len());

    for line in lines {
        running += line.delta();
        rows.push(StatementRow {
            line,
            balance: running,
        });
    }

    (rows, running)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn line(no: i64, debit: Decimal, credit: Decimal) -> LedgerLine {
        LedgerLine {
            posting_id: Uuid::now_v7(),
            posting_no: no,
            entry_id: Uuid::now_v7(),
            effective_at: DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(no),
            memo: None,
            account_code: "1100".to_string(),
            debit,
            credit,
            party: None,
        }
    }

    /// Reconstructs balances page by page, the way the report engine does:
    /// opening plus the delta of all in-range rows before the page, then
    /// walk the page.
    fn paged_balances(lines: &[LedgerLine], opening: Decimal, page_size: usize) -> Vec<Decimal> {
        let mut balances = Vec::with_capacity(lines.len());
        let mut offset = 0;
        while offset < lines.len() {
            let prior_delta: Decimal = lines[..offset].iter().map(LedgerLine::delta).sum();
            let start = opening_for_page(opening, prior_delta);

            let page: Vec<LedgerLine> = lines[offset..(offset + page_size).min(lines.len())]
                .to_vec();
            let (rows, _) = walk_page(start, page);
            balances.extend(rows.into_iter().map(|r| r.balance));
            offset += page_size;
        }
        balances
    }

    #[test]
    fn test_walk_single_page() {
        let lines = vec![
            line(1, dec!(100), dec!(0)),
            line(2, dec!(0), dec!(30)),
            line(3, dec!(50), dec!(0)),
        ];
        let (rows, closing) = walk_page(dec!(10), lines);

        assert_eq!(rows[0].balance, dec!(110));
        assert_eq!(rows[1].balance, dec!(80));
        assert_eq!(rows[2].balance, dec!(130));
        assert_eq!(closing, dec!(130));
    }

    #[test]
    fn test_spec_scenario_25_postings_page_size_10() {
        // 25 postings: odd entries debit 100, even entries credit 50,
        // opening balance 0. Page size 10 must produce the same running
        // balances at rows 10, 11, 20, 21 as a single unpaginated walk.
        let lines: Vec<LedgerLine> = (1..=25)
            .map(|n| {
                if n % 2 == 1 {
                    line(n, dec!(100), dec!(0))
                } else {
                    line(n, dec!(0), dec!(50))
                }
            })
            .collect();

        let (full, _) = walk_page(dec!(0), lines.clone());
        let full_balances: Vec<Decimal> = full.iter().map(|r| r.balance).collect();

        let paged = paged_balances(&lines, dec!(0), 10);

        assert_eq!(full_balances, paged);
        // Spot-check the page boundaries (1-indexed rows 10, 11, 20, 21).
        for idx in [9, 10, 19, 20] {
            assert_eq!(full_balances[idx], paged[idx], "row {}", idx + 1);
        }
    }

    #[test]
    fn test_empty_page_keeps_opening() {
        let (rows, closing) = walk_page(dec!(42), vec![]);
        assert!(rows.is_empty());
        assert_eq!(closing, dec!(42));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Page-invariance: for any posting stream, opening balance, and
        /// page size, the paged reconstruction equals the full walk.
        #[test]
        fn prop_running_balance_is_page_invariant(
            cents in prop::collection::vec(-500_000i64..500_000, 1..60),
            opening_cents in -1_000_000i64..1_000_000,
            page_size in 1usize..15,
        ) {
            let lines: Vec<LedgerLine> = cents
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let amount = Decimal::new(c.abs(), 2);
                    if *c >= 0 {
                        line(i as i64 + 1, amount, Decimal::ZERO)
                    } else {
                        line(i as i64 + 1, Decimal::ZERO, amount)
                    }
                })
                .collect();
            let opening = Decimal::new(opening_cents, 2);

            let (full, closing) = walk_page(opening, lines.clone());
            let full_balances: Vec<Decimal> = full.iter().map(|r| r.balance).collect();

            let paged = paged_balances(&lines, opening, page_size);

            prop_assert_eq!(&full_balances, &paged);
            prop_assert_eq!(closing, *full_balances.last().unwrap());
        }

        /// The closing balance equals opening plus the sum of all deltas.
        #[test]
        fn prop_closing_is_opening_plus_total_delta(
            cents in prop::collection::vec(-500_000i64..500_000, 1..60),
        ) {
            let lines: Vec<LedgerLine> = cents
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let amount = Decimal::new(c.abs(), 2);
                    if *c >= 0 {
                        line(i as i64 + 1, amount, Decimal::ZERO)
                    } else {
                        line(i as i64 + 1, Decimal::ZERO, amount)
                    }
                })
                .collect();

            let total: Decimal = lines.iter().map(LedgerLine::delta).sum();
            let (_, closing) = walk_page(Decimal::ZERO, lines);
            prop_assert_eq!(closing, total);
        }
    }
}
