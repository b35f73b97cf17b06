//! Ledger / statement report repository.
//!
//! Produces running-balance statements for a customer or vendor (or
//! aggregated across all parties of a kind) over an optional date range,
//! paginated. Query side of the "opening, prior-page delta, walk"
//! algorithm in `tillbook_core::reports::statement`:
//!
//! 1. opening = SUM(debit - credit) before the range start
//! 2. the page of postings ordered by `(effective_at ASC, posting_no ASC)`
//! 3. prior-page delta = the same sum over in-range rows strictly before
//!    the page's first row, by the same ordering
//! 4. the core walk emits `balance = running` per row

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use tillbook_core::ledger::{Party, PartyKind};
use tillbook_core::reports::error::validate_range;
use tillbook_core::reports::statement::{opening_for_page, walk_page, LedgerLine, StatementRow};
use tillbook_core::reports::{LedgerQuery, ReportError};
use tillbook_shared::types::PageMeta;

use crate::entities::{accounts, journal_entries, journal_postings, sea_orm_active_enums};

/// Effective timestamp of a posting: the posting's own (finer-grained)
/// timestamp when available, else the entry's nominal date, else the
/// entry's creation time. Keeps same-day orderings stable.
const EFFECTIVE_AT: &str = "COALESCE(journal_postings.created_at, \
     journal_entries.entry_date::timestamptz, journal_entries.created_at)";

/// Error types for statement queries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerReportError {
    /// Input validation failure (bad date range).
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The account-code filter does not resolve to an account.
    #[error("Unknown account code: {0}")]
    UnknownAccount(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A running-balance statement page.
#[derive(Debug, Clone)]
pub struct LedgerStatement {
    /// Party kind filter the statement was produced for.
    pub party_kind: Option<PartyKind>,
    /// Party filter the statement was produced for.
    pub party_id: Option<Uuid>,
    /// Balance carried forward from before the range start (zero when the
    /// range is open at the start).
    pub opening: Decimal,
    /// Opening adjusted by the prior-page delta: the balance the first row
    /// of this page continues from.
    pub opening_for_page: Decimal,
    /// The page rows with running balances.
    pub rows: Vec<StatementRow>,
    /// Running balance after the last row of the page.
    pub closing: Decimal,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Ledger report repository.
#[derive(Debug, Clone)]
pub struct LedgerReportRepository {
    db: DatabaseConnection,
}

impl LedgerReportRepository {
    /// Creates a new ledger report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Produces one page of a running-balance statement.
    ///
    /// # Errors
    ///
    /// - `ReportError::InvalidDateRange` when `from > to` (before any
    ///   query executes)
    /// - `UnknownAccount` when the account-code filter is not in the chart
    pub async fn get_ledger(&self, query: LedgerQuery) -> Result<LedgerStatement, LedgerReportError> {
        validate_range(query.from, query.to)?;

        let account_id = match &query.account_code {
            Some(code) => Some(self.resolve_account(code).await?),
            None => None,
        };

        // Opening: everything for the filter before the range start.
        let opening = match query.from {
            Some(from) => {
                let q = filtered(&query, account_id)
                    .filter(Expr::expr(Expr::cust(EFFECTIVE_AT)).lt(from));
                self.sum_delta(q).await?
            }
            None => Decimal::ZERO,
        };

        // Total in-range rows, for pagination metadata.
        let total = in_range(filtered(&query, account_id), query.from, query.to)
            .count(&self.db)
            .await?;

        // The page, in (effective_at, posting_no) order. find_also_related
        // supplies the entries join for this select.
        let page_query = apply_filters(
            journal_postings::Entity::find().find_also_related(journal_entries::Entity),
            &query,
            account_id,
        );
        let page_rows = apply_range(page_query, query.from, query.to)
            .order_by(Expr::cust(EFFECTIVE_AT), Order::Asc)
            .order_by(journal_postings::Column::PostingNo, Order::Asc)
            .offset(query.page.offset())
            .limit(query.page.limit())
            .all(&self.db)
            .await?;

        // Prior-page delta: in-range rows strictly before the page's
        // first row, by the same compound ordering.
        let prior_delta = match (query.page.is_first(), page_rows.first()) {
            (false, Some((first_posting, first_entry))) => {
                let first_eff = effective_at(first_posting, first_entry.as_ref());
                let before = Condition::any()
                    .add(Expr::expr(Expr::cust(EFFECTIVE_AT)).lt(first_eff))
                    .add(
                        Condition::all()
                            .add(Expr::expr(Expr::cust(EFFECTIVE_AT)).eq(first_eff))
                            .add(
                                journal_postings::Column::PostingNo
                                    .lt(first_posting.posting_no),
                            ),
                    );
                let q = in_range(filtered(&query, account_id), query.from, query.to)
                    .filter(before);
                self.sum_delta(q).await?
            }
            _ => Decimal::ZERO,
        };

        let page_opening = opening_for_page(opening, prior_delta);
        let lines = self.into_lines(page_rows).await?;
        let (rows, closing) = walk_page(page_opening, lines);

        Ok(LedgerStatement {
            party_kind: query.party_kind,
            party_id: query.party_id,
            opening,
            opening_for_page: page_opening,
            rows,
            closing,
            meta: PageMeta::new(query.page.page, query.page.per_page, total),
        })
    }

    async fn resolve_account(&self, code: &str) -> Result<Uuid, LedgerReportError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerReportError::UnknownAccount(code.to_string()))?;
        Ok(account.id)
    }

    /// `SUM(debit - credit)` of the selected postings.
    async fn sum_delta(
        &self,
        query: Select<journal_postings::Entity>,
    ) -> Result<Decimal, LedgerReportError> {
        let delta: Option<Decimal> = query
            .select_only()
            .column_as(
                Expr::cust("COALESCE(SUM(journal_postings.debit - journal_postings.credit), 0)"),
                "delta",
            )
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(delta.unwrap_or(Decimal::ZERO))
    }

    /// Converts fetched (posting, entry) pairs into core ledger lines,
    /// resolving account codes in one batch.
    async fn into_lines(
        &self,
        page_rows: Vec<(journal_postings::Model, Option<journal_entries::Model>)>,
    ) -> Result<Vec<LedgerLine>, LedgerReportError> {
        let mut account_ids: Vec<Uuid> = page_rows.iter().map(|(p, _)| p.account_id).collect();
        account_ids.sort();
        account_ids.dedup();

        let codes: std::collections::HashMap<Uuid, String> = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a.code))
            .collect();

        Ok(page_rows
            .into_iter()
            .map(|(posting, entry)| {
                let effective = effective_at(&posting, entry.as_ref());
                LedgerLine {
                    posting_id: posting.id,
                    posting_no: posting.posting_no,
                    entry_id: posting.journal_entry_id,
                    effective_at: effective,
                    memo: entry.and_then(|e| e.memo),
                    account_code: codes
                        .get(&posting.account_id)
                        .cloned()
                        .unwrap_or_default(),
                    debit: posting.debit,
                    credit: posting.credit,
                    party: party_of(&posting),
                }
            })
            .collect())
    }
}

/// Base filtered posting select, joined to entries. Used for the opening,
/// prior-delta, and count aggregates.
fn filtered(query: &LedgerQuery, account_id: Option<Uuid>) -> Select<journal_postings::Entity> {
    let q = journal_postings::Entity::find().join(
        JoinType::InnerJoin,
        journal_postings::Relation::JournalEntries.def(),
    );
    apply_filters(q, query, account_id)
}

/// Applies the statement filters to any posting select that has the
/// entries join. Void entries are excluded from every statement.
fn apply_filters<Q: QueryFilter>(mut q: Q, query: &LedgerQuery, account_id: Option<Uuid>) -> Q {
    q = q.filter(journal_entries::Column::Status.eq(sea_orm_active_enums::EntryStatus::Posted));

    if let Some(kind) = query.party_kind {
        let db_kind: sea_orm_active_enums::PartyKind = kind.into();
        q = q.filter(journal_postings::Column::PartyKind.eq(db_kind));
    }
    if let Some(party_id) = query.party_id {
        q = q.filter(journal_postings::Column::PartyId.eq(party_id));
    }
    if let Some(account_id) = account_id {
        q = q.filter(journal_postings::Column::AccountId.eq(account_id));
    }
    if let Some(branch_id) = query.branch_id {
        q = q.filter(journal_entries::Column::BranchId.eq(branch_id));
    }

    q
}

/// Applies the date range on the effective timestamp.
fn apply_range<Q: QueryFilter>(mut q: Q, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Q {
    if let Some(from) = from {
        q = q.filter(Expr::expr(Expr::cust(EFFECTIVE_AT)).gte(from));
    }
    if let Some(to) = to {
        // Inclusive end: everything before the next day.
        match to.succ_opt() {
            Some(next) => q = q.filter(Expr::expr(Expr::cust(EFFECTIVE_AT)).lt(next)),
            None => q = q.filter(Expr::expr(Expr::cust(EFFECTIVE_AT)).lte(to)),
        }
    }
    q
}

/// Range-filtered variant of [`filtered`] for aggregates.
fn in_range(
    q: Select<journal_postings::Entity>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Select<journal_postings::Entity> {
    apply_range(q, from, to)
}

/// Client-side mirror of the SQL effective-timestamp resolution. The date
/// fallback assumes the database session runs in UTC.
fn effective_at(
    posting: &journal_postings::Model,
    entry: Option<&journal_entries::Model>,
) -> DateTime<Utc> {
    if let Some(created) = posting.created_at {
        return created.with_timezone(&Utc);
    }
    match entry {
        Some(e) => e
            .entry_date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(|| e.created_at.with_timezone(&Utc)),
        None => DateTime::<Utc>::UNIX_EPOCH,
    }
}

fn party_of(posting: &journal_postings::Model) -> Option<Party> {
    match (posting.party_kind.clone(), posting.party_id) {
        (Some(sea_orm_active_enums::PartyKind::Customer), Some(id)) => Some(Party::Customer(id)),
        (Some(sea_orm_active_enums::PartyKind::Vendor), Some(id)) => Some(Party::Vendor(id)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn posting(created_at: Option<DateTime<Utc>>) -> journal_postings::Model {
        journal_postings::Model {
            id: Uuid::now_v7(),
            posting_no: 1,
            journal_entry_id: Uuid::now_v7(),
            account_id: Uuid::now_v7(),
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            party_kind: None,
            party_id: None,
            created_at: created_at.map(Into::into),
        }
    }

    fn entry(entry_date: NaiveDate) -> journal_entries::Model {
        journal_entries::Model {
            id: Uuid::now_v7(),
            entry_date,
            memo: None,
            branch_id: None,
            reference_kind: None,
            reference_id: None,
            status: sea_orm_active_enums::EntryStatus::Posted,
            created_by: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_effective_at_prefers_posting_timestamp() {
        let ts = Utc::now();
        let p = posting(Some(ts));
        let e = entry(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(effective_at(&p, Some(&e)), ts);
    }

    #[test]
    fn test_effective_at_falls_back_to_entry_date() {
        let p = posting(None);
        let date = NaiveDate::from_ymd_opt(2026, 5, 17).unwrap();
        let e = entry(date);
        let eff = effective_at(&p, Some(&e));
        assert_eq!(eff.date_naive(), date);
        assert_eq!(eff.time(), chrono::NaiveTime::MIN);
    }

    #[test]
    fn test_party_of() {
        let mut p = posting(None);
        assert_eq!(party_of(&p), None);

        let id = Uuid::now_v7();
        p.party_kind = Some(sea_orm_active_enums::PartyKind::Vendor);
        p.party_id = Some(id);
        assert_eq!(party_of(&p), Some(Party::Vendor(id)));
    }
}
