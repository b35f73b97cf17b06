//! Purchase claim repository.
//!
//! Claims of defective purchased goods. Creation validates every line
//! against the remaining claimable quantity (purchased minus already
//! claimed) under row lock, all-or-nothing. Approval locks the claim
//! header and decrements stock (unclamped) per line.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use tillbook_core::claims::{validate_claim_lines, ClaimError, ClaimLine};
use tillbook_core::inventory::MovementKind;

use crate::entities::{purchase_claim_items, purchase_claims, purchase_items, sea_orm_active_enums};
use crate::repositories::inventory::outbound_in;

/// Error types for claim operations.
#[derive(Debug, thiserror::Error)]
pub enum ClaimRepoError {
    /// Domain failure (over-quantity, empty claim, unknown item).
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a purchase claim.
#[derive(Debug, Clone)]
pub struct CreateClaimInput {
    /// The purchase being claimed against.
    pub purchase_id: Uuid,
    /// Branch of the claim.
    pub branch_id: Uuid,
    /// Claim date.
    pub claim_date: NaiveDate,
    /// Optional memo.
    pub memo: Option<String>,
    /// Requested claim lines.
    pub lines: Vec<ClaimLine>,
    /// The user filing the claim.
    pub actor_id: Option<Uuid>,
}

/// A created claim with its items.
#[derive(Debug, Clone)]
pub struct ClaimWithItems {
    /// The claim header.
    pub claim: purchase_claims::Model,
    /// The claim items.
    pub items: Vec<purchase_claim_items::Model>,
}

/// Claim repository.
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    db: DatabaseConnection,
}

impl ClaimRepository {
    /// Creates a new claim repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a claim after validating every line against the remaining
    /// claimable quantity, read under row lock. All violating lines are
    /// reported together and nothing is inserted when any line violates.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::OverQuantity` listing every violating line,
    /// or the first structural error (empty claim, unknown item,
    /// non-positive quantity).
    pub async fn create_claim(
        &self,
        input: CreateClaimInput,
    ) -> Result<ClaimWithItems, ClaimRepoError> {
        let txn = self.db.begin().await?;

        let remaining = Self::remaining_by_item(&txn, input.purchase_id).await?;
        validate_claim_lines(&input.lines, &remaining)?;

        let now = Utc::now();
        let claim = purchase_claims::ActiveModel {
            id: Set(Uuid::now_v7()),
            purchase_id: Set(input.purchase_id),
            branch_id: Set(input.branch_id),
            claim_date: Set(input.claim_date),
            status: Set(sea_orm_active_enums::ClaimStatus::Pending),
            memo: Set(input.memo),
            created_by: Set(input.actor_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        let mut items = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let item = purchase_claim_items::ActiveModel {
                id: Set(Uuid::now_v7()),
                claim_id: Set(claim.id),
                purchase_item_id: Set(line.purchase_item_id),
                quantity: Set(line.quantity),
                created_at: Set(now.into()),
            }
            .insert(&txn)
            .await?;
            items.push(item);
        }

        txn.commit().await?;

        info!(claim_id = %claim.id, lines = items.len(), "purchase claim created");
        Ok(ClaimWithItems { claim, items })
    }

    /// Remaining claimable quantity per purchase item of a purchase,
    /// with the purchase item rows locked for the transaction.
    async fn remaining_by_item(
        txn: &DatabaseTransaction,
        purchase_id: Uuid,
    ) -> Result<HashMap<Uuid, Decimal>, ClaimRepoError> {
        let items = purchase_items::Entity::find()
            .filter(purchase_items::Column::PurchaseId.eq(purchase_id))
            .lock_exclusive()
            .all(txn)
            .await?;

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let mut claimed: HashMap<Uuid, Decimal> = HashMap::new();

        if !item_ids.is_empty() {
            let claim_items = purchase_claim_items::Entity::find()
                .filter(purchase_claim_items::Column::PurchaseItemId.is_in(item_ids))
                .all(txn)
                .await?;

            for ci in claim_items {
                *claimed.entry(ci.purchase_item_id).or_default() += ci.quantity;
            }
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let already = claimed.get(&item.id).copied().unwrap_or_default();
                (item.id, item.quantity - already)
            })
            .collect())
    }

    /// Approves a claim: locks the header, rejects double approval, and
    /// decrements stock per line (unclamped - over-claim goes negative by
    /// design).
    ///
    /// # Errors
    ///
    /// Returns `AlreadyApproved` on a second approval, `NotFound` for an
    /// unknown claim.
    pub async fn approve_claim(
        &self,
        claim_id: Uuid,
        actor_id: Option<Uuid>,
    ) -> Result<purchase_claims::Model, ClaimRepoError> {
        let txn = self.db.begin().await?;

        let claim = purchase_claims::Entity::find_by_id(claim_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ClaimError::NotFound(claim_id))?;

        if claim.status == sea_orm_active_enums::ClaimStatus::Approved {
            return Err(ClaimError::AlreadyApproved(claim_id).into());
        }

        let items = purchase_claim_items::Entity::find()
            .filter(purchase_claim_items::Column::ClaimId.eq(claim_id))
            .all(&txn)
            .await?;

        for item in &items {
            let purchase_item = purchase_items::Entity::find_by_id(item.purchase_item_id)
                .one(&txn)
                .await?
                .ok_or(ClaimError::UnknownPurchaseItem(item.purchase_item_id))?;

            outbound_in(
                &txn,
                purchase_item.product_id,
                purchase_item.branch_id,
                item.quantity,
                MovementKind::Claim,
                Some(format!("claim {claim_id}")),
                actor_id,
            )
            .await?;
        }

        let mut active: purchase_claims::ActiveModel = claim.into();
        active.status = Set(sea_orm_active_enums::ClaimStatus::Approved);
        active.updated_at = Set(Utc::now().into());
        let approved = active.update(&txn).await?;

        txn.commit().await?;

        info!(claim_id = %claim_id, lines = items.len(), "purchase claim approved");
        Ok(approved)
    }
}
