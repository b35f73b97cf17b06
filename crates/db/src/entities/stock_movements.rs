//! `SeaORM` Entity for the stock_movements table.
//!
//! Append-only audit trail of every stock quantity change, with the unit
//! cost in effect at movement time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_stock_id: Uuid,
    pub product_id: Uuid,
    pub branch_id: Uuid,
    pub kind: MovementKind,
    /// Quantity moved (positive; direction comes from `kind`).
    pub quantity: Decimal,
    /// Unit cost in effect when the movement happened.
    pub unit_cost: Decimal,
    pub reference: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_stocks::Entity",
        from = "Column::ProductStockId",
        to = "super::product_stocks::Column::Id"
    )]
    ProductStocks,
}

impl Related<super::product_stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductStocks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
