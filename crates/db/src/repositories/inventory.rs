//! Inventory valuation repository.
//!
//! Maintains the moving-average unit cost per (product, branch). The stock
//! row is taken under `SELECT ... FOR UPDATE` before every
//! read-modify-write so concurrent receipts on the same key cannot lose
//! updates; the costing math itself lives in `tillbook-core`.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use tillbook_core::inventory::{self, MovementKind, StockLevel};
use tillbook_shared::types::{PageRequest, PageResponse};

use crate::entities::{product_stocks, stock_movements};

/// Error types for inventory operations.
///
/// Oversell and over-return are deliberately NOT errors: quantities go
/// negative instead of blocking.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for the stock movement report.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    /// Filter by product.
    pub product_id: Option<Uuid>,
    /// Filter by branch.
    pub branch_id: Option<Uuid>,
    /// Filter by movement kind.
    pub kind: Option<MovementKind>,
    /// Filter by date range start.
    pub from: Option<NaiveDate>,
    /// Filter by date range end.
    pub to: Option<NaiveDate>,
}

/// Inventory repository.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Receives purchased quantity, revising the moving average:
    /// `((old_qty * old_avg) + (qty * unit_price)) / (old_qty + qty)`.
    ///
    /// Zero or negative quantity is a no-op (the stock row is still
    /// created at zero if absent).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn receive_purchase(
        &self,
        product_id: Uuid,
        branch_id: Uuid,
        qty: Decimal,
        unit_price: Decimal,
        reference: Option<String>,
        actor_id: Option<Uuid>,
    ) -> Result<product_stocks::Model, InventoryError> {
        let txn = self.db.begin().await?;
        let stock = lock_or_create_stock(&txn, product_id, branch_id).await?;

        if qty <= Decimal::ZERO {
            warn!(%product_id, %branch_id, %qty, "ignoring non-positive receive quantity");
            txn.commit().await?;
            return Ok(stock);
        }

        let level = inventory::receive(level_of(&stock), qty, unit_price);
        let updated = apply_level(&txn, stock, level).await?;
        record_movement(
            &txn,
            &updated,
            MovementKind::Purchase,
            qty,
            unit_price,
            reference,
            actor_id,
        )
        .await?;
        txn.commit().await?;

        info!(%product_id, %branch_id, %qty, avg_cost = %updated.avg_cost, "purchase received");
        Ok(updated)
    }

    /// Returns quantity to the vendor at the current average cost.
    ///
    /// Decrements without clamping at zero (negative on-hand is permitted
    /// by design) and never revises the average. Returns the updated stock
    /// row and the average cost that was in effect, so the caller can post
    /// a price-variance entry if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn return_to_vendor(
        &self,
        product_id: Uuid,
        branch_id: Uuid,
        qty: Decimal,
        reference: Option<String>,
        actor_id: Option<Uuid>,
    ) -> Result<(product_stocks::Model, Decimal), InventoryError> {
        self.outbound(
            product_id,
            branch_id,
            qty,
            MovementKind::PurchaseReturn,
            reference,
            actor_id,
        )
        .await
    }

    /// Consumes quantity for a sale at the current average cost (COGS).
    ///
    /// Oversell is allowed; quantity goes negative instead of blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn consume_for_sale(
        &self,
        product_id: Uuid,
        branch_id: Uuid,
        qty: Decimal,
        reference: Option<String>,
        actor_id: Option<Uuid>,
    ) -> Result<(product_stocks::Model, Decimal), InventoryError> {
        self.outbound(
            product_id,
            branch_id,
            qty,
            MovementKind::Sale,
            reference,
            actor_id,
        )
        .await
    }

    /// Restocks a customer return at the current average cost. The average
    /// is not revised (only purchase receipts do that).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn restock_from_customer_return(
        &self,
        product_id: Uuid,
        branch_id: Uuid,
        qty: Decimal,
        reference: Option<String>,
        actor_id: Option<Uuid>,
    ) -> Result<product_stocks::Model, InventoryError> {
        let txn = self.db.begin().await?;
        let stock = lock_or_create_stock(&txn, product_id, branch_id).await?;

        if qty <= Decimal::ZERO {
            warn!(%product_id, %branch_id, %qty, "ignoring non-positive restock quantity");
            txn.commit().await?;
            return Ok(stock);
        }

        let level = inventory::restock(level_of(&stock), qty);
        let unit_cost = level.avg_cost;
        let updated = apply_level(&txn, stock, level).await?;
        record_movement(
            &txn,
            &updated,
            MovementKind::SaleReturn,
            qty,
            unit_cost,
            reference,
            actor_id,
        )
        .await?;
        txn.commit().await?;

        Ok(updated)
    }

    async fn outbound(
        &self,
        product_id: Uuid,
        branch_id: Uuid,
        qty: Decimal,
        kind: MovementKind,
        reference: Option<String>,
        actor_id: Option<Uuid>,
    ) -> Result<(product_stocks::Model, Decimal), InventoryError> {
        let txn = self.db.begin().await?;
        let (updated, avg_cost) =
            outbound_in(&txn, product_id, branch_id, qty, kind, reference, actor_id).await?;
        txn.commit().await?;
        Ok((updated, avg_cost))
    }

    /// Current stock level of a (product, branch), if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_stock(
        &self,
        product_id: Uuid,
        branch_id: Uuid,
    ) -> Result<Option<product_stocks::Model>, InventoryError> {
        let stock = product_stocks::Entity::find()
            .filter(product_stocks::Column::ProductId.eq(product_id))
            .filter(product_stocks::Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await?;
        Ok(stock)
    }

    /// Paginated stock movement listing for the movement report.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_movements(
        &self,
        filter: MovementFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<stock_movements::Model>, InventoryError> {
        let mut query = stock_movements::Entity::find();

        if let Some(product_id) = filter.product_id {
            query = query.filter(stock_movements::Column::ProductId.eq(product_id));
        }
        if let Some(branch_id) = filter.branch_id {
            query = query.filter(stock_movements::Column::BranchId.eq(branch_id));
        }
        if let Some(kind) = filter.kind {
            let db_kind: crate::entities::sea_orm_active_enums::MovementKind = kind.into();
            query = query.filter(stock_movements::Column::Kind.eq(db_kind));
        }
        if let Some(from) = filter.from {
            query = query.filter(
                stock_movements::Column::CreatedAt
                    .gte(from.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()),
            );
        }
        if let Some(to) = filter.to
            && let Some(next) = to.succ_opt()
        {
            query = query.filter(
                stock_movements::Column::CreatedAt
                    .lt(next.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()),
            );
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(stock_movements::Column::CreatedAt)
            .order_by_desc(stock_movements::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }
}

/// Locks the (product, branch) stock row, creating one at zero if absent.
pub(crate) async fn lock_or_create_stock<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    branch_id: Uuid,
) -> Result<product_stocks::Model, DbErr> {
    let existing = product_stocks::Entity::find()
        .filter(product_stocks::Column::ProductId.eq(product_id))
        .filter(product_stocks::Column::BranchId.eq(branch_id))
        .lock_exclusive()
        .one(conn)
        .await?;

    if let Some(stock) = existing {
        return Ok(stock);
    }

    let now = Utc::now();
    let stock = product_stocks::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_id: Set(product_id),
        branch_id: Set(branch_id),
        quantity: Set(Decimal::ZERO),
        avg_cost: Set(Decimal::ZERO),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    stock.insert(conn).await
}

/// Applies an outbound movement (sale, vendor return, claim) inside an
/// existing transaction. Used directly by claim approval so the stock
/// decrement shares the claim's transaction.
pub(crate) async fn outbound_in<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    branch_id: Uuid,
    qty: Decimal,
    kind: MovementKind,
    reference: Option<String>,
    actor_id: Option<Uuid>,
) -> Result<(product_stocks::Model, Decimal), DbErr> {
    let stock = lock_or_create_stock(conn, product_id, branch_id).await?;

    if qty <= Decimal::ZERO {
        warn!(%product_id, %branch_id, %qty, "ignoring non-positive outbound quantity");
        let avg = stock.avg_cost;
        return Ok((stock, avg));
    }

    // Allow negative: just decrement, no available-qty check.
    let (level, avg_cost) = inventory::consume(level_of(&stock), qty);
    let updated = apply_level(conn, stock, level).await?;
    record_movement(conn, &updated, kind, qty, avg_cost, reference, actor_id).await?;

    Ok((updated, avg_cost))
}

fn level_of(stock: &product_stocks::Model) -> StockLevel {
    StockLevel {
        quantity: stock.quantity,
        avg_cost: stock.avg_cost,
    }
}

async fn apply_level<C: ConnectionTrait>(
    conn: &C,
    stock: product_stocks::Model,
    level: StockLevel,
) -> Result<product_stocks::Model, DbErr> {
    let mut active: product_stocks::ActiveModel = stock.into();
    active.quantity = Set(level.quantity);
    active.avg_cost = Set(level.avg_cost);
    active.updated_at = Set(Utc::now().into());
    active.update(conn).await
}

async fn record_movement<C: ConnectionTrait>(
    conn: &C,
    stock: &product_stocks::Model,
    kind: MovementKind,
    qty: Decimal,
    unit_cost: Decimal,
    reference: Option<String>,
    actor_id: Option<Uuid>,
) -> Result<(), DbErr> {
    let movement = stock_movements::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_stock_id: Set(stock.id),
        product_id: Set(stock.product_id),
        branch_id: Set(stock.branch_id),
        kind: Set(kind.into()),
        quantity: Set(qty),
        unit_cost: Set(unit_cost),
        reference: Set(reference),
        created_by: Set(actor_id),
        created_at: Set(Utc::now().into()),
    };
    movement.insert(conn).await?;
    Ok(())
}
