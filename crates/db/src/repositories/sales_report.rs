//! Sales report repository.
//!
//! Per-day rollup of sale-referenced journal entries: document count and
//! recognized revenue.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value};
use serde::Serialize;
use uuid::Uuid;

use tillbook_core::reports::error::validate_range;
use tillbook_core::reports::ReportError;

/// Error types for sales report queries.
#[derive(Debug, thiserror::Error)]
pub enum SalesReportError {
    /// Input validation failure (bad date range).
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// One day of the sales report.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct DailySalesRow {
    /// The day.
    pub day: NaiveDate,
    /// Number of sale documents posted that day.
    pub invoices: i64,
    /// Revenue recognized that day (income credits net of debits).
    pub revenue: Decimal,
}

/// Sales report repository.
#[derive(Debug, Clone)]
pub struct SalesReportRepository {
    db: DatabaseConnection,
}

impl SalesReportRepository {
    /// Creates a new sales report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Per-day sales totals over the range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from > to` (before any query).
    pub async fn daily_sales(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        branch_id: Option<Uuid>,
    ) -> Result<Vec<DailySalesRow>, SalesReportError> {
        validate_range(Some(from), Some(to))?;

        let mut sql = String::from(
            "SELECT je.entry_date AS day, \
               COUNT(DISTINCT je.id) AS invoices, \
               COALESCE(SUM(jp.credit - jp.debit), 0) AS revenue \
             FROM journal_postings jp \
             JOIN journal_entries je ON je.id = jp.journal_entry_id \
             JOIN accounts a ON a.id = jp.account_id \
             WHERE je.status = 'posted' AND je.reference_kind = 'sale' \
               AND a.account_type = 'income' \
               AND je.entry_date >= $1 AND je.entry_date <= $2",
        );
        let mut values: Vec<Value> = vec![from.into(), to.into()];

        if let Some(branch_id) = branch_id {
            sql.push_str(" AND je.branch_id = $3");
            values.push(branch_id.into());
        }
        sql.push_str(" GROUP BY je.entry_date ORDER BY je.entry_date");

        let rows = DailySalesRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?;

        Ok(rows)
    }
}
