//! Chart of accounts taxonomy and stable account codes.
//!
//! The chart of accounts is fixed and seeded; services refer to accounts by
//! their stable string code, never by id. Lookups by code must fail loudly
//! when the code is missing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account types - fixed taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset accounts (cash, bank, receivables, inventory).
    Asset,
    /// Liability accounts (payables, output VAT).
    Liability,
    /// Equity accounts.
    Equity,
    /// Income accounts (sales revenue, other income).
    Income,
    /// Expense accounts (COGS, operating expenses).
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    ///
    /// Asset/Expense accounts are debit-normal; Liability/Equity/Income
    /// accounts are credit-normal.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Income => NormalBalance::Credit,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Account subtypes used by the cashbook and P&L engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    /// Cash and bank accounts (cashbook feed, method mappings).
    CashAndBank,
    /// Cost of goods sold (gross profit line in the P&L).
    CostOfGoodsSold,
    /// Operating expenses.
    OperatingExpense,
}

/// Normal balance side of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal (Asset, Expense).
    Debit,
    /// Credit-normal (Liability, Equity, Income).
    Credit,
}

impl NormalBalance {
    /// Calculates the signed balance for debit/credit totals.
    ///
    /// Debit-normal: balance = debit - credit.
    /// Credit-normal: balance = credit - debit.
    #[must_use]
    pub fn signed_balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Stable account codes of the seeded chart.
///
/// These codes are a public contract: every posting call site and the
/// seeder use them. Changing a code is a breaking change.
pub mod codes {
    /// Cash in hand.
    pub const CASH_IN_HAND: &str = "1010";
    /// Bank account.
    pub const BANK: &str = "1020";
    /// Accounts receivable.
    pub const ACCOUNTS_RECEIVABLE: &str = "1100";
    /// Inventory on hand.
    pub const INVENTORY: &str = "1200";
    /// Input VAT (receivable from the tax office).
    pub const VAT_INPUT: &str = "1300";
    /// Accounts payable.
    pub const ACCOUNTS_PAYABLE: &str = "2100";
    /// Output VAT (payable to the tax office).
    pub const VAT_OUTPUT: &str = "2300";
    /// Owner equity.
    pub const OWNER_EQUITY: &str = "3000";
    /// Sales revenue.
    pub const SALES_REVENUE: &str = "4000";
    /// Other income.
    pub const OTHER_INCOME: &str = "4900";
    /// Cost of goods sold.
    pub const COGS: &str = "5000";
    /// Purchase price variance.
    pub const PURCHASE_PRICE_VARIANCE: &str = "5200";
    /// General operating expense.
    pub const OPERATING_EXPENSE: &str = "6000";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_normal_balance_by_type() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountType::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Income.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_signed_balance() {
        assert_eq!(
            NormalBalance::Debit.signed_balance(dec!(100), dec!(30)),
            dec!(70)
        );
        assert_eq!(
            NormalBalance::Credit.signed_balance(dec!(30), dec!(100)),
            dec!(70)
        );
    }

    #[test]
    fn test_account_type_roundtrip() {
        for t in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Income,
            AccountType::Expense,
        ] {
            assert_eq!(AccountType::from_str(&t.to_string()).unwrap(), t);
        }
        assert!(AccountType::from_str("revenue").is_err());
    }
}
