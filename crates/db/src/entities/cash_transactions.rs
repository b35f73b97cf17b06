//! `SeaORM` Entity for the cash_transactions table.
//!
//! A read-optimized mirror of cash-affecting source documents, not the
//! ledger itself. At most one live mirror exists per source document
//! (partial unique index over source_kind/source_id where deleted_at is
//! null); the source row keeps a back-reference to its mirror.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CashTxnStatus, CashTxnType, PartyKind, SourceKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub txn_date: Date,
    pub account_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub txn_type: CashTxnType,
    /// Always positive; direction comes from `txn_type`.
    pub amount: Decimal,
    pub method: Option<String>,
    pub counterparty_kind: Option<PartyKind>,
    pub counterparty_id: Option<Uuid>,
    pub source_kind: Option<SourceKind>,
    pub source_id: Option<Uuid>,
    pub status: CashTxnStatus,
    pub reference: Option<String>,
    pub voucher_no: Option<String>,
    pub note: Option<String>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
