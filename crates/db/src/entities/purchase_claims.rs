//! `SeaORM` Entity for the purchase_claims table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ClaimStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_claims")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub branch_id: Uuid,
    pub claim_date: Date,
    pub status: ClaimStatus,
    pub memo: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
