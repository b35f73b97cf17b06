//! Profit & loss aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::AccountId;

use crate::account::{AccountSubtype, AccountType};

/// Per-account debit/credit totals over the report period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTotal {
    /// Account id.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype, if any.
    pub account_subtype: Option<AccountSubtype>,
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
}

impl AccountTotal {
    /// Net balance per the account's normal-balance rule.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.account_type
            .normal_balance()
            .signed_balance(self.total_debit, self.total_credit)
    }
}

/// One section of the profit & loss report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PnlSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountTotal>,
}

impl PnlSection {
    fn add(&mut self, account: AccountTotal) {
        self.total += account.balance();
        self.accounts.push(account);
    }
}

/// Profit & loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitLossReport {
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Income section.
    pub income: PnlSection,
    /// Cost of goods sold section.
    pub cost_of_goods_sold: PnlSection,
    /// Gross profit (income - COGS).
    pub gross_profit: Decimal,
    /// Operating expenses section.
    pub operating_expenses: PnlSection,
    /// Operating profit (gross profit - operating expenses).
    pub operating_profit: Decimal,
    /// Remaining expenses (price variance and other untyped expenses).
    pub other_expenses: PnlSection,
    /// Net profit.
    pub net_profit: Decimal,
}

/// Builds the profit & loss report from per-account period totals.
///
/// Income and expense accounts only; accounts of other types are ignored.
/// Gross profit uses the `cost_of_goods_sold` subtype, operating profit the
/// `operating_expense` subtype; everything else expense-typed lands in
/// `other_expenses`.
#[must_use]
pub fn build_profit_loss(
    period_start: NaiveDate,
    period_end: NaiveDate,
    accounts: Vec<AccountTotal>,
) -> ProfitLossReport {
    let mut income = PnlSection::default();
    let mut cogs = PnlSection::default();
    let mut operating = PnlSection::default();
    let mut other = PnlSection::default();

    for account in accounts {
        match (account.account_type, account.account_subtype) {
            (AccountType::Income, _) => income.add(account),
            (AccountType::Expense, Some(AccountSubtype::CostOfGoodsSold)) => cogs.add(account),
            (AccountType::Expense, Some(AccountSubtype::OperatingExpense)) => {
                operating.add(account);
            }
            (AccountType::Expense, _) => other.add(account),
            _ => {}
        }
    }

    let gross_profit = income.total - cogs.total;
    let operating_profit = gross_profit - operating.total;
    let net_profit = operating_profit - other.total;

    ProfitLossReport {
        period_start,
        period_end,
        income,
        cost_of_goods_sold: cogs,
        gross_profit,
        operating_expenses: operating,
        operating_profit,
        other_expenses: other,
        net_profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(
        code: &str,
        account_type: AccountType,
        subtype: Option<AccountSubtype>,
        debit: Decimal,
        credit: Decimal,
    ) -> AccountTotal {
        AccountTotal {
            account_id: AccountId::new(),
            code: code.to_string(),
            name: code.to_string(),
            account_type,
            account_subtype: subtype,
            total_debit: debit,
            total_credit: credit,
        }
    }

    #[test]
    fn test_profit_loss_sections() {
        let period = (
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        let accounts = vec![
            account("4000", AccountType::Income, None, dec!(100), dec!(5100)),
            account(
                "5000",
                AccountType::Expense,
                Some(AccountSubtype::CostOfGoodsSold),
                dec!(3000),
                dec!(0),
            ),
            account(
                "6000",
                AccountType::Expense,
                Some(AccountSubtype::OperatingExpense),
                dec!(800),
                dec!(50),
            ),
            account("5200", AccountType::Expense, None, dec!(120), dec!(0)),
            // Balance-sheet accounts are ignored.
            account("1010", AccountType::Asset, None, dec!(9999), dec!(0)),
        ];

        let report = build_profit_loss(period.0, period.1, accounts);

        assert_eq!(report.income.total, dec!(5000));
        assert_eq!(report.cost_of_goods_sold.total, dec!(3000));
        assert_eq!(report.gross_profit, dec!(2000));
        assert_eq!(report.operating_expenses.total, dec!(750));
        assert_eq!(report.operating_profit, dec!(1250));
        assert_eq!(report.other_expenses.total, dec!(120));
        assert_eq!(report.net_profit, dec!(1130));
        assert_eq!(report.income.accounts.len(), 1);
    }

    #[test]
    fn test_empty_accounts_zero_report() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let report = build_profit_loss(day, day, vec![]);
        assert_eq!(report.net_profit, dec!(0));
        assert_eq!(report.gross_profit, dec!(0));
    }
}
