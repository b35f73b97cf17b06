//! `SeaORM` Entity for the purchase_items table.
//!
//! Purchase line items. The purchase document itself lives with the
//! document services; these rows are kept here because the claim quantity
//! ceiling reads purchased quantities under row lock.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub product_id: Uuid,
    pub branch_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_claim_items::Entity")]
    PurchaseClaimItems,
}

impl Related<super::purchase_claim_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseClaimItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
