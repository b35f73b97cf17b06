//! Posting repository - the journal entry write path.
//!
//! The single entry point for writing balanced journal entries. Every
//! other component (document posting, cash expenses, adjustments) must
//! route through [`PostingRepository::post`] rather than writing postings
//! directly; it is the only line of defense for the balance invariant.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use tillbook_core::ledger::{
    DocumentRef, EntryStatus, JournalInput, LedgerError, LedgerService, Party,
};

use crate::entities::{accounts, journal_entries, journal_postings, sea_orm_active_enums};

/// Error types for posting operations.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    /// Validation failure (unbalanced entry, unknown account, bad line).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A created journal entry together with its postings.
#[derive(Debug, Clone)]
pub struct JournalEntryWithPostings {
    /// The entry header.
    pub entry: journal_entries::Model,
    /// The postings, in line order.
    pub postings: Vec<journal_postings::Model>,
}

/// Posting repository.
#[derive(Debug, Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
}

impl PostingRepository {
    /// Creates a new posting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and commits a balanced journal entry.
    ///
    /// The balance check and the account-code resolution both happen
    /// before the transaction starts, so callers fail fast with a precise
    /// error. The entry header and one posting per line are then created
    /// atomically; any failure rolls the whole entry back.
    ///
    /// # Errors
    ///
    /// - `LedgerError::UnbalancedEntry` when debit/credit sums differ at
    ///   2-decimal precision (nothing is written)
    /// - `LedgerError::UnknownAccount` when a line's code is not in the
    ///   chart (nothing is written)
    /// - `PostingError::Database` on connection/constraint failures
    pub async fn post(&self, input: JournalInput) -> Result<JournalEntryWithPostings, PostingError> {
        let totals = LedgerService::validate(&input)?;
        let account_ids = self.resolve_accounts(&input).await?;

        let txn = self.db.begin().await?;
        let entry = Self::insert_entry(&txn, &input).await?;
        let postings = Self::insert_postings(&txn, entry.id, &input, &account_ids).await?;
        txn.commit().await?;

        info!(
            entry_id = %entry.id,
            lines = postings.len(),
            debit = %totals.debit,
            credit = %totals.credit,
            "journal entry posted"
        );

        Ok(JournalEntryWithPostings { entry, postings })
    }

    /// Resolves every account code of the input to an id, before the
    /// transaction starts.
    async fn resolve_accounts(
        &self,
        input: &JournalInput,
    ) -> Result<HashMap<String, Uuid>, PostingError> {
        let mut codes: Vec<String> = input
            .lines
            .iter()
            .map(|l| l.account_code.clone())
            .collect();
        codes.sort();
        codes.dedup();

        let found = accounts::Entity::find()
            .filter(accounts::Column::Code.is_in(codes.clone()))
            .all(&self.db)
            .await?;

        let map: HashMap<String, Uuid> = found.into_iter().map(|a| (a.code, a.id)).collect();

        for code in &codes {
            if !map.contains_key(code) {
                return Err(LedgerError::UnknownAccount(code.clone()).into());
            }
        }

        Ok(map)
    }

    async fn insert_entry(
        txn: &DatabaseTransaction,
        input: &JournalInput,
    ) -> Result<journal_entries::Model, PostingError> {
        let now = Utc::now();
        let entry_date = input.entry_date.unwrap_or_else(|| now.date_naive());

        let entry = journal_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            entry_date: Set(entry_date),
            memo: Set(Some(input.memo.clone())),
            branch_id: Set(input.branch_id),
            reference_kind: Set(input.reference.map(Into::into)),
            reference_id: Set(input.reference.map(DocumentRef::id)),
            status: Set(sea_orm_active_enums::EntryStatus::Posted),
            created_by: Set(input.actor_id),
            created_at: Set(now.into()),
        };

        Ok(entry.insert(txn).await?)
    }

    async fn insert_postings(
        txn: &DatabaseTransaction,
        entry_id: Uuid,
        input: &JournalInput,
        account_ids: &HashMap<String, Uuid>,
    ) -> Result<Vec<journal_postings::Model>, PostingError> {
        let now = Utc::now();
        let mut postings = Vec::with_capacity(input.lines.len());

        for line in &input.lines {
            // resolve_accounts guarantees presence; a miss here is a bug.
            let account_id = account_ids
                .get(&line.account_code)
                .copied()
                .ok_or_else(|| LedgerError::UnknownAccount(line.account_code.clone()))?;

            let posting = journal_postings::ActiveModel {
                id: Set(Uuid::now_v7()),
                journal_entry_id: Set(entry_id),
                account_id: Set(account_id),
                debit: Set(line.debit),
                credit: Set(line.credit),
                party_kind: Set(line.party.map(|p| p.kind().into())),
                party_id: Set(line.party.map(Party::id)),
                created_at: Set(Some(now.into())),
                ..Default::default()
            };

            postings.push(posting.insert(txn).await?);
        }

        Ok(postings)
    }

    /// Sets the post-hoc status of an entry - the one permitted mutation.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the entry does not exist.
    pub async fn set_status(
        &self,
        entry_id: Uuid,
        status: EntryStatus,
    ) -> Result<journal_entries::Model, PostingError> {
        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        let mut active: journal_entries::ActiveModel = entry.into();
        active.status = Set(status.into());
        let updated = active.update(&self.db).await?;

        info!(entry_id = %entry_id, status = ?status, "journal entry status changed");
        Ok(updated)
    }

    /// Loads an entry with its postings in line order.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the entry does not exist.
    pub async fn get_entry(&self, entry_id: Uuid) -> Result<JournalEntryWithPostings, PostingError> {
        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&self.db)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        let postings = journal_postings::Entity::find()
            .filter(journal_postings::Column::JournalEntryId.eq(entry_id))
            .order_by_asc(journal_postings::Column::PostingNo)
            .all(&self.db)
            .await?;

        Ok(JournalEntryWithPostings { entry, postings })
    }
}
