//! Profit & loss report repository.
//!
//! Fetches per-account debit/credit totals over the period and hands them
//! to the core P&L builder.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};
use std::str::FromStr;
use uuid::Uuid;

use tillbook_core::account::{AccountSubtype, AccountType};
use tillbook_core::reports::error::validate_range;
use tillbook_core::reports::pnl::{build_profit_loss, AccountTotal, ProfitLossReport};
use tillbook_core::reports::ReportError;

/// Error types for P&L queries.
#[derive(Debug, thiserror::Error)]
pub enum PnlError {
    /// Input validation failure (bad date range).
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, FromQueryResult)]
struct AccountTotalRow {
    account_id: Uuid,
    code: String,
    name: String,
    account_type: String,
    account_subtype: Option<String>,
    total_debit: Decimal,
    total_credit: Decimal,
}

/// P&L report repository.
#[derive(Debug, Clone)]
pub struct PnlRepository {
    db: DatabaseConnection,
}

impl PnlRepository {
    /// Creates a new P&L repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Produces the profit & loss report for the period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from > to` (before any query).
    pub async fn query_profit_loss(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        branch_id: Option<Uuid>,
    ) -> Result<ProfitLossReport, PnlError> {
        validate_range(Some(from), Some(to))?;

        let mut posting_conditions =
            String::from("je.status = 'posted' AND je.entry_date >= $1 AND je.entry_date <= $2");
        let mut values: Vec<Value> = vec![from.into(), to.into()];

        if let Some(branch_id) = branch_id {
            posting_conditions.push_str(" AND je.branch_id = $3");
            values.push(branch_id.into());
        }

        let sql = format!(
            "SELECT a.id AS account_id, a.code, a.name, \
               a.account_type::text AS account_type, \
               a.account_subtype::text AS account_subtype, \
               COALESCE(t.total_debit, 0) AS total_debit, \
               COALESCE(t.total_credit, 0) AS total_credit \
             FROM accounts a \
             LEFT JOIN ( \
               SELECT jp.account_id, SUM(jp.debit) AS total_debit, SUM(jp.credit) AS total_credit \
               FROM journal_postings jp \
               JOIN journal_entries je ON je.id = jp.journal_entry_id \
               WHERE {posting_conditions} \
               GROUP BY jp.account_id \
             ) t ON t.account_id = a.id \
             WHERE a.account_type IN ('income', 'expense') AND a.is_active \
             ORDER BY a.code"
        );

        let rows = AccountTotalRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            let account_type = AccountType::from_str(&row.account_type).map_err(DbErr::Type)?;
            accounts.push(AccountTotal {
                account_id: tillbook_shared::types::AccountId::from_uuid(row.account_id),
                code: row.code,
                name: row.name,
                account_type,
                account_subtype: row.account_subtype.as_deref().and_then(parse_subtype),
                total_debit: row.total_debit,
                total_credit: row.total_credit,
            });
        }

        Ok(build_profit_loss(from, to, accounts))
    }
}

fn parse_subtype(value: &str) -> Option<AccountSubtype> {
    match value {
        "cash_and_bank" => Some(AccountSubtype::CashAndBank),
        "cost_of_goods_sold" => Some(AccountSubtype::CostOfGoodsSold),
        "operating_expense" => Some(AccountSubtype::OperatingExpense),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subtype() {
        assert_eq!(
            parse_subtype("cost_of_goods_sold"),
            Some(AccountSubtype::CostOfGoodsSold)
        );
        assert_eq!(
            parse_subtype("operating_expense"),
            Some(AccountSubtype::OperatingExpense)
        );
        assert_eq!(parse_subtype("cash_and_bank"), Some(AccountSubtype::CashAndBank));
        assert_eq!(parse_subtype("unknown"), None);
    }
}
