//! Adjustment repository.
//!
//! Posts the delta journal entries computed by the core adjustment engine
//! when a prior document's totals change. The original entry is never
//! touched; a no-op change posts nothing.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use tillbook_core::adjustment::{AdjustmentService, DocTotals, GoodsRoute};
use tillbook_core::ledger::{DocumentRef, JournalInput};

use crate::repositories::posting::{JournalEntryWithPostings, PostingError, PostingRepository};

/// Adjustment repository.
#[derive(Debug, Clone)]
pub struct AdjustmentRepository {
    posting: PostingRepository,
}

impl AdjustmentRepository {
    /// Creates a new adjustment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            posting: PostingRepository::new(db),
        }
    }

    /// Posts the delta entry for a revised purchase bill.
    ///
    /// The goods delta routes to inventory when nothing has been received
    /// yet, or to the price-variance account when any quantity has; the
    /// tax delta to input VAT; accounts payable absorbs the opposite side.
    /// Returns `None` when all deltas are zero.
    ///
    /// # Errors
    ///
    /// Propagates posting failures (the delta entry balances by
    /// construction, so only unknown accounts or database errors occur).
    #[allow(clippy::too_many_arguments)]
    pub async fn post_bill_adjustment(
        &self,
        purchase_id: Uuid,
        branch_id: Option<Uuid>,
        old: DocTotals,
        new: DocTotals,
        any_received: bool,
        vendor_id: Option<Uuid>,
        date: Option<NaiveDate>,
        actor_id: Option<Uuid>,
    ) -> Result<Option<JournalEntryWithPostings>, PostingError> {
        let route = GoodsRoute::for_received(any_received);
        let Some(lines) = AdjustmentService::bill_adjustment_lines(old, new, route, vendor_id)
        else {
            return Ok(None);
        };

        let input = JournalInput {
            branch_id,
            entry_date: date,
            memo: format!("Bill adjustment for purchase {purchase_id}"),
            reference: Some(DocumentRef::Purchase(purchase_id)),
            lines,
            actor_id,
        };

        let created = self.posting.post(input).await?;
        info!(purchase_id = %purchase_id, entry_id = %created.entry.id, "bill adjustment posted");
        Ok(Some(created))
    }

    /// Posts the delta entry for a revised sale.
    ///
    /// The goods delta routes to sales revenue, the tax delta to output
    /// VAT; accounts receivable absorbs the opposite side. Returns `None`
    /// when all deltas are zero.
    ///
    /// # Errors
    ///
    /// Propagates posting failures.
    pub async fn post_sale_adjustment(
        &self,
        sale_id: Uuid,
        branch_id: Option<Uuid>,
        old: DocTotals,
        new: DocTotals,
        customer_id: Option<Uuid>,
        date: Option<NaiveDate>,
        actor_id: Option<Uuid>,
    ) -> Result<Option<JournalEntryWithPostings>, PostingError> {
        let Some(lines) = AdjustmentService::sale_adjustment_lines(old, new, customer_id) else {
            return Ok(None);
        };

        let input = JournalInput {
            branch_id,
            entry_date: date,
            memo: format!("Sale adjustment for sale {sale_id}"),
            reference: Some(DocumentRef::Sale(sale_id)),
            lines,
            actor_id,
        };

        let created = self.posting.post(input).await?;
        info!(sale_id = %sale_id, entry_id = %created.entry.id, "sale adjustment posted");
        Ok(Some(created))
    }
}
