//! Cashbook report repository.
//!
//! Produces the running in/out feed over the cash-transaction mirror with
//! the same opening / prior-page delta / walk pagination as the ledger
//! statement, plus the entry-level "expense paid via cash" split computed
//! from the postings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Statement, Value,
};
use uuid::Uuid;

use tillbook_core::ledger::Party;
use tillbook_core::reports::cashbook::{
    expense_cash_portion, walk_feed, CashFeedLine, CashbookRow,
};
use tillbook_core::reports::error::validate_range;
use tillbook_core::reports::statement::opening_for_page;
use tillbook_core::reports::{CashbookQuery, ReportError};
use tillbook_shared::types::PageMeta;

use crate::entities::{cash_transactions, sea_orm_active_enums};

/// Signed movement of a mirror row: inflows positive, outflows negative.
const SIGNED_AMOUNT: &str = "CASE WHEN cash_transactions.txn_type IN ('receipt', 'transfer_in') \
     THEN cash_transactions.amount ELSE -cash_transactions.amount END";

/// Error types for cashbook queries.
#[derive(Debug, thiserror::Error)]
pub enum CashbookError {
    /// Input validation failure (bad date range).
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A cashbook feed page.
#[derive(Debug, Clone)]
pub struct CashbookReport {
    /// Balance carried forward from before the range start.
    pub opening: Decimal,
    /// Opening adjusted by the prior-page delta.
    pub opening_for_page: Decimal,
    /// The page rows with running balances.
    pub rows: Vec<CashbookRow>,
    /// Running balance after the last row of the page.
    pub closing: Decimal,
    /// Expense recognized in the range that was settled in cash
    /// (entry-level `LEAST(cash credits, expense debits)`).
    pub expense_paid_via_cash: Decimal,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Cashbook report repository.
#[derive(Debug, Clone)]
pub struct CashbookRepository {
    db: DatabaseConnection,
}

impl CashbookRepository {
    /// Creates a new cashbook repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Produces one page of the cashbook feed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `from > to` (before any query).
    pub async fn get_cashbook(
        &self,
        query: CashbookQuery,
    ) -> Result<CashbookReport, CashbookError> {
        validate_range(query.from, query.to)?;

        let opening = match query.from {
            Some(from) => {
                let q = filtered(&query).filter(cash_transactions::Column::TxnDate.lt(from));
                self.sum_signed(q).await?
            }
            None => Decimal::ZERO,
        };

        let total = in_range(filtered(&query), query.from, query.to)
            .count(&self.db)
            .await?;

        let page_rows = in_range(filtered(&query), query.from, query.to)
            .order_by(cash_transactions::Column::TxnDate, Order::Asc)
            .order_by(cash_transactions::Column::CreatedAt, Order::Asc)
            .order_by(cash_transactions::Column::Id, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await?;

        let prior_delta = match (query.page.is_first(), page_rows.first()) {
            (false, Some(first)) => {
                let before = Condition::any()
                    .add(cash_transactions::Column::TxnDate.lt(first.txn_date))
                    .add(
                        Condition::all()
                            .add(cash_transactions::Column::TxnDate.eq(first.txn_date))
                            .add(
                                Condition::any()
                                    .add(
                                        cash_transactions::Column::CreatedAt
                                            .lt(first.created_at),
                                    )
                                    .add(
                                        Condition::all()
                                            .add(
                                                cash_transactions::Column::CreatedAt
                                                    .eq(first.created_at),
                                            )
                                            .add(cash_transactions::Column::Id.lt(first.id)),
                                    ),
                            ),
                    );
                let q = in_range(filtered(&query), query.from, query.to).filter(before);
                self.sum_signed(q).await?
            }
            _ => Decimal::ZERO,
        };

        let expense_paid_via_cash = self
            .expense_paid_via_cash(query.from, query.to, query.branch_id)
            .await?;

        let page_opening = opening_for_page(opening, prior_delta);
        let lines: Vec<CashFeedLine> = page_rows.into_iter().map(feed_line).collect();
        let (rows, closing) = walk_feed(page_opening, lines);

        Ok(CashbookReport {
            opening,
            opening_for_page: page_opening,
            rows,
            closing,
            expense_paid_via_cash,
            meta: PageMeta::new(query.page.page, query.page.per_page, total),
        })
    }

    /// Sums the signed amounts of the selected mirror rows.
    async fn sum_signed(
        &self,
        query: Select<cash_transactions::Entity>,
    ) -> Result<Decimal, CashbookError> {
        let sum: Option<Decimal> = query
            .select_only()
            .column_as(
                Expr::cust(&format!("COALESCE(SUM({SIGNED_AMOUNT}), 0)")),
                "delta",
            )
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(sum.unwrap_or(Decimal::ZERO))
    }

    /// Expense recognized in the range that was settled through a cash or
    /// bank account, summed per journal entry as
    /// `LEAST(cash_credit_total, expense_debit_total)`. The entry-level
    /// join keeps an expense entry with partial cash / partial on-account
    /// settlement from being double counted.
    async fn expense_paid_via_cash(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        branch_id: Option<Uuid>,
    ) -> Result<Decimal, CashbookError> {
        let mut conditions = String::from("je.status = 'posted'");
        let mut values: Vec<Value> = Vec::new();
        let mut next_param = 1;

        if let Some(from) = from {
            conditions.push_str(&format!(" AND je.entry_date >= ${next_param}"));
            values.push(from.into());
            next_param += 1;
        }
        if let Some(to) = to {
            conditions.push_str(&format!(" AND je.entry_date <= ${next_param}"));
            values.push(to.into());
            next_param += 1;
        }
        if let Some(branch_id) = branch_id {
            conditions.push_str(&format!(" AND je.branch_id = ${next_param}"));
            values.push(branch_id.into());
        }

        let sql = format!(
            "SELECT jp.journal_entry_id, \
               SUM(CASE WHEN a.account_subtype = 'cash_and_bank' THEN jp.credit ELSE 0 END) AS cash_credit, \
               SUM(CASE WHEN a.account_type = 'expense' THEN jp.debit ELSE 0 END) AS expense_debit \
             FROM journal_postings jp \
             JOIN journal_entries je ON je.id = jp.journal_entry_id \
             JOIN accounts a ON a.id = jp.account_id \
             WHERE {conditions} \
             GROUP BY jp.journal_entry_id \
             HAVING SUM(CASE WHEN a.account_type = 'expense' THEN jp.debit ELSE 0 END) > 0"
        );

        #[derive(Debug, FromQueryResult)]
        struct EntrySplitRow {
            cash_credit: Decimal,
            expense_debit: Decimal,
        }

        let rows = EntrySplitRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .iter()
            .map(|r| expense_cash_portion(r.cash_credit, r.expense_debit))
            .sum())
    }
}

/// Live, non-void mirror rows with the query filters applied.
fn filtered(query: &CashbookQuery) -> Select<cash_transactions::Entity> {
    let mut q = cash_transactions::Entity::find()
        .filter(cash_transactions::Column::DeletedAt.is_null())
        .filter(cash_transactions::Column::Status.ne(sea_orm_active_enums::CashTxnStatus::Void));

    if let Some(branch_id) = query.branch_id {
        q = q.filter(cash_transactions::Column::BranchId.eq(branch_id));
    }
    if let Some(account_id) = query.account_id {
        q = q.filter(cash_transactions::Column::AccountId.eq(account_id));
    }

    q
}

fn in_range(
    mut q: Select<cash_transactions::Entity>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Select<cash_transactions::Entity> {
    if let Some(from) = from {
        q = q.filter(cash_transactions::Column::TxnDate.gte(from));
    }
    if let Some(to) = to {
        q = q.filter(cash_transactions::Column::TxnDate.lte(to));
    }
    q
}

fn feed_line(row: cash_transactions::Model) -> CashFeedLine {
    let counterparty = match (row.counterparty_kind.clone(), row.counterparty_id) {
        (Some(sea_orm_active_enums::PartyKind::Customer), Some(id)) => Some(Party::Customer(id)),
        (Some(sea_orm_active_enums::PartyKind::Vendor), Some(id)) => Some(Party::Vendor(id)),
        _ => None,
    };

    CashFeedLine {
        txn_id: row.id,
        txn_date: row.txn_date,
        txn_type: row.txn_type.into(),
        amount: row.amount,
        method: row.method,
        counterparty,
        reference: row.reference,
    }
}
