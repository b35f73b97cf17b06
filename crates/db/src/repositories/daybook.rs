//! DayBook report repository.
//!
//! Fetches per-day, per-account-type debit/credit sums and hands them to
//! the core daybook engine, which applies the IN/OUT convention, fills the
//! dense day series, and paginates.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};

use tillbook_core::account::AccountType;
use tillbook_core::reports::daybook::{build_report, cash_in_out, dense_series, DaybookReport};
use tillbook_core::reports::error::validate_range;
use tillbook_core::reports::{DaybookQuery, ReportError};

/// Error types for daybook queries.
#[derive(Debug, thiserror::Error)]
pub enum DaybookError {
    /// Input validation failure (bad date range).
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, FromQueryResult)]
struct DayTypeRow {
    day: chrono::NaiveDate,
    account_type: String,
    debit: Decimal,
    credit: Decimal,
}

/// DayBook report repository.
#[derive(Debug, Clone)]
pub struct DaybookRepository {
    db: DatabaseConnection,
}

impl DaybookRepository {
    /// Creates a new daybook repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Produces the day-wise IN/OUT series for the range, dense over every
    /// day including those with zero activity, in the requested order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from > to` (before any query).
    pub async fn get_daybook(&self, query: DaybookQuery) -> Result<DaybookReport, DaybookError> {
        validate_range(Some(query.from), Some(query.to))?;

        let mut sql = String::from(
            "SELECT je.entry_date AS day, a.account_type::text AS account_type, \
             COALESCE(SUM(jp.debit), 0) AS debit, COALESCE(SUM(jp.credit), 0) AS credit \
             FROM journal_postings jp \
             JOIN journal_entries je ON je.id = jp.journal_entry_id \
             JOIN accounts a ON a.id = jp.account_id \
             WHERE je.status = 'posted' AND je.entry_date >= $1 AND je.entry_date <= $2",
        );
        let mut values: Vec<Value> = vec![query.from.into(), query.to.into()];

        if let Some(branch_id) = query.branch_id {
            sql.push_str(" AND je.branch_id = $3");
            values.push(branch_id.into());
        }
        sql.push_str(" GROUP BY je.entry_date, a.account_type");

        let rows = DayTypeRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?;

        // Fold the per-type sums into per-day IN/OUT buckets using the
        // cash-equivalent convention.
        let mut buckets: HashMap<chrono::NaiveDate, (Decimal, Decimal)> = HashMap::new();
        for row in rows {
            let account_type = AccountType::from_str(&row.account_type)
                .map_err(DbErr::Type)?;
            let (cash_in, cash_out) = cash_in_out(account_type, row.debit, row.credit);
            let bucket = buckets.entry(row.day).or_default();
            bucket.0 += cash_in;
            bucket.1 += cash_out;
        }

        let series = dense_series(query.from, query.to, &buckets);
        Ok(build_report(
            query.from,
            query.to,
            series,
            query.order,
            &query.page,
        ))
    }
}
