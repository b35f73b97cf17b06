//! Cashbook feed over the cash-transaction mirror.
//!
//! The cashbook shows a simple in/out feed with a running balance, read
//! from the mirror instead of replaying double-entry postings. Pagination
//! uses the same opening / prior-page delta / walk pattern as the ledger
//! statement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cashsync::{CashDirection, CashTxnType};
use crate::ledger::Party;

/// One fetched mirror row of a cashbook page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFeedLine {
    /// Cash transaction id.
    pub txn_id: Uuid,
    /// Transaction date.
    pub txn_date: NaiveDate,
    /// Transaction type.
    pub txn_type: CashTxnType,
    /// Amount (always positive).
    pub amount: Decimal,
    /// Payment method key (absent for account-only expense rows).
    pub method: Option<String>,
    /// Counterparty, if any.
    pub counterparty: Option<Party>,
    /// Free-form reference.
    pub reference: Option<String>,
}

impl CashFeedLine {
    /// Signed movement of this row: inflows positive, outflows negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.txn_type.direction() {
            CashDirection::In => self.amount,
            CashDirection::Out => -self.amount,
        }
    }
}

/// A cashbook row: a mirror transaction plus the running balance after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashbookRow {
    /// The mirror transaction.
    pub line: CashFeedLine,
    /// Running balance after this transaction.
    pub balance: Decimal,
}

/// Walks one page of the cash feed in order, emitting the running balance
/// after each row. Returns the rows and the page's closing balance.
#[must_use]
pub fn walk_feed(
    opening_for_page: Decimal,
    lines: Vec<CashFeedLine>,
) -> (Vec<CashbookRow>, Decimal) {
    let mut running = opening_for_page;
    let mut rows = Vec::with_capacity(lines.len());

    for line in lines {
        running += line.signed_amount();
        rows.push(CashbookRow {
            line,
            balance: running,
        });
    }

    (rows, running)
}

/// The portion of a journal entry's expense recognition that was settled
/// in cash: `LEAST(cash_credit_total, expense_debit_total)` per entry.
///
/// Taking the minimum at entry level keeps an expense entry with partial
/// cash / partial on-account settlement from being double counted.
#[must_use]
pub fn expense_cash_portion(cash_credit_total: Decimal, expense_debit_total: Decimal) -> Decimal {
    cash_credit_total
        .min(expense_debit_total)
        .max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn feed_line(day: u32, txn_type: CashTxnType, amount: Decimal) -> CashFeedLine {
        CashFeedLine {
            txn_id: Uuid::now_v7(),
            txn_date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
            txn_type,
            amount,
            method: Some("cash".to_string()),
            counterparty: None,
            reference: None,
        }
    }

    #[test]
    fn test_signed_amount_by_type() {
        assert_eq!(
            feed_line(1, CashTxnType::Receipt, dec!(100)).signed_amount(),
            dec!(100)
        );
        assert_eq!(
            feed_line(1, CashTxnType::Payment, dec!(40)).signed_amount(),
            dec!(-40)
        );
        assert_eq!(
            feed_line(1, CashTxnType::Expense, dec!(15)).signed_amount(),
            dec!(-15)
        );
        assert_eq!(
            feed_line(1, CashTxnType::TransferIn, dec!(5)).signed_amount(),
            dec!(5)
        );
        assert_eq!(
            feed_line(1, CashTxnType::TransferOut, dec!(5)).signed_amount(),
            dec!(-5)
        );
    }

    #[test]
    fn test_walk_feed_running_balance() {
        let lines = vec![
            feed_line(1, CashTxnType::Receipt, dec!(200)),
            feed_line(2, CashTxnType::Payment, dec!(50)),
            feed_line(3, CashTxnType::Expense, dec!(30)),
        ];
        let (rows, closing) = walk_feed(dec!(100), lines);

        assert_eq!(rows[0].balance, dec!(300));
        assert_eq!(rows[1].balance, dec!(250));
        assert_eq!(rows[2].balance, dec!(220));
        assert_eq!(closing, dec!(220));
    }

    #[test]
    fn test_expense_cash_portion_least() {
        // Expense 100 settled 60 cash / 40 on account: only 60 is cash.
        assert_eq!(expense_cash_portion(dec!(60), dec!(100)), dec!(60));
        // Cash credit larger than the expense (mixed entry): cap at the
        // expense recognized.
        assert_eq!(expense_cash_portion(dec!(100), dec!(70)), dec!(70));
        assert_eq!(expense_cash_portion(dec!(0), dec!(100)), dec!(0));
    }
}
