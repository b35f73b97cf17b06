//! `SeaORM` Entity for the purchase_claim_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_claim_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub claim_id: Uuid,
    pub purchase_item_id: Uuid,
    pub quantity: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_claims::Entity",
        from = "Column::ClaimId",
        to = "super::purchase_claims::Column::Id",
        on_delete = "Cascade"
    )]
    PurchaseClaims,
    #[sea_orm(
        belongs_to = "super::purchase_items::Entity",
        from = "Column::PurchaseItemId",
        to = "super::purchase_items::Column::Id"
    )]
    PurchaseItems,
}

impl Related<super::purchase_claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseClaims.def()
    }
}

impl Related<super::purchase_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
