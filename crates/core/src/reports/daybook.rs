//! Day-wise cash movement rollup.
//!
//! The daybook replays account-type-tagged postings into IN/OUT amounts per
//! day. IN/OUT describe cash-equivalent movement direction, not the
//! account's nature; the mapping below is a business convention carried
//! over verbatim and must not be rederived from debit/credit-normal rules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tillbook_shared::types::PageRequest;

use super::types::ReportOrder;
use crate::account::AccountType;

/// Splits a posting into (IN, OUT) cash-equivalent amounts by account type.
///
/// Convention: asset, liability, equity and income accounts count credits
/// as IN and debits as OUT; expense accounts count debits as IN (money paid
/// out through the cash proxy) and credits as OUT.
#[must_use]
pub fn cash_in_out(account_type: AccountType, debit: Decimal, credit: Decimal) -> (Decimal, Decimal) {
    match account_type {
        AccountType::Asset | AccountType::Liability | AccountType::Equity | AccountType::Income => {
            (credit, debit)
        }
        AccountType::Expense => (debit, credit),
    }
}

/// One day of the daybook series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// The day.
    pub date: NaiveDate,
    /// Total IN amount of the day.
    pub total_in: Decimal,
    /// Total OUT amount of the day.
    pub total_out: Decimal,
    /// Net movement (IN minus OUT).
    pub net: Decimal,
}

/// Page-level and whole-range totals, returned side by side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaybookTotals {
    /// IN total of the returned page.
    pub page_in: Decimal,
    /// OUT total of the returned page.
    pub page_out: Decimal,
    /// IN total of the whole requested range.
    pub range_in: Decimal,
    /// OUT total of the whole requested range.
    pub range_out: Decimal,
}

/// The daybook report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaybookReport {
    /// First day of the range.
    pub from: NaiveDate,
    /// Last day of the range.
    pub to: NaiveDate,
    /// The page of day cells, in the requested order.
    pub days: Vec<DayCell>,
    /// Page and range totals.
    pub totals: DaybookTotals,
    /// Total number of days in the range (for pagination).
    pub total_days: u64,
}

/// Builds the dense ascending day series for `[from, to]`, including days
/// with zero activity.
#[must_use]
pub fn dense_series(
    from: NaiveDate,
    to: NaiveDate,
    buckets: &HashMap<NaiveDate, (Decimal, Decimal)>,
) -> Vec<DayCell> {
    let mut days = Vec::new();
    let mut day = from;
    while day <= to {
        let (total_in, total_out) = buckets.get(&day).copied().unwrap_or_default();
        days.push(DayCell {
            date: day,
            total_in,
            total_out,
            net: total_in - total_out,
        });
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }
    days
}

/// Assembles the report: paginates the ascending series, applies the
/// requested presentation order to the page, and computes page vs range
/// totals.
#[must_use]
pub fn build_report(
    from: NaiveDate,
    to: NaiveDate,
    series: Vec<DayCell>,
    order: ReportOrder,
    page: &PageRequest,
) -> DaybookReport {
    let range_in: Decimal = series.iter().map(|d| d.total_in).sum();
    let range_out: Decimal = series.iter().map(|d| d.total_out).sum();
    let total_days = series.len() as u64;

    // Pagination indexes the presentation order, so newest-first paging
    // starts from the end of the ascending series.
    let ordered: Vec<DayCell> = match order {
        ReportOrder::Asc => series,
        ReportOrder::Desc => series.into_iter().rev().collect(),
    };

    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let days: Vec<DayCell> = ordered
        .into_iter()
        .skip(start)
        .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
        .collect();

    let page_in: Decimal = days.iter().map(|d| d.total_in).sum();
    let page_out: Decimal = days.iter().map(|d| d.total_out).sum();

    DaybookReport {
        from,
        to,
        days,
        totals: DaybookTotals {
            page_in,
            page_out,
            range_in,
            range_out,
        },
        total_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[rstest]
    #[case(AccountType::Asset, dec!(10), dec!(40), dec!(40), dec!(10))]
    #[case(AccountType::Liability, dec!(10), dec!(40), dec!(40), dec!(10))]
    #[case(AccountType::Equity, dec!(10), dec!(40), dec!(40), dec!(10))]
    #[case(AccountType::Income, dec!(10), dec!(40), dec!(40), dec!(10))]
    #[case(AccountType::Expense, dec!(10), dec!(40), dec!(10), dec!(40))]
    fn test_cash_in_out_mapping(
        #[case] account_type: AccountType,
        #[case] debit: Decimal,
        #[case] credit: Decimal,
        #[case] expected_in: Decimal,
        #[case] expected_out: Decimal,
    ) {
        assert_eq!(
            cash_in_out(account_type, debit, credit),
            (expected_in, expected_out)
        );
    }

    #[test]
    fn test_dense_series_fills_empty_days() {
        let mut buckets = HashMap::new();
        buckets.insert(d(1), (dec!(100), dec!(20)));
        buckets.insert(d(3), (dec!(50), dec!(0)));

        let series = dense_series(d(1), d(4), &buckets);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].net, dec!(80));
        assert_eq!(series[1].total_in, dec!(0));
        assert_eq!(series[1].total_out, dec!(0));
        assert_eq!(series[2].net, dec!(50));
        assert_eq!(series[3].net, dec!(0));
    }

    #[test]
    fn test_build_report_desc_order() {
        let buckets: HashMap<NaiveDate, (Decimal, Decimal)> =
            [(d(1), (dec!(10), dec!(0))), (d(2), (dec!(20), dec!(0)))]
                .into_iter()
                .collect();
        let series = dense_series(d(1), d(3), &buckets);

        let report = build_report(
            d(1),
            d(3),
            series,
            ReportOrder::Desc,
            &PageRequest::new(1, 10),
        );

        let dates: Vec<NaiveDate> = report.days.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![d(3), d(2), d(1)]);
        assert_eq!(report.totals.range_in, dec!(30));
    }

    #[test]
    fn test_build_report_page_vs_range_totals() {
        let buckets: HashMap<NaiveDate, (Decimal, Decimal)> = (1..=6)
            .map(|n| (d(n), (Decimal::from(n), dec!(1))))
            .collect();
        let series = dense_series(d(1), d(6), &buckets);

        let report = build_report(
            d(1),
            d(6),
            series,
            ReportOrder::Asc,
            &PageRequest::new(2, 3),
        );

        // Page 2 holds days 4..6.
        assert_eq!(report.days.len(), 3);
        assert_eq!(report.totals.page_in, dec!(15));
        assert_eq!(report.totals.page_out, dec!(3));
        assert_eq!(report.totals.range_in, dec!(21));
        assert_eq!(report.totals.range_out, dec!(6));
        assert_eq!(report.total_days, 6);
    }

    #[test]
    fn test_single_day_range() {
        let series = dense_series(d(5), d(5), &HashMap::new());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, d(5));
    }
}
