//! `SeaORM` Entity for the accounts table (chart of accounts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountSubtype, AccountType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Stable string code - the only identifier services depend on.
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub account_subtype: Option<AccountSubtype>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_postings::Entity")]
    JournalPostings,
    #[sea_orm(has_many = "super::cash_transactions::Entity")]
    CashTransactions,
}

impl Related<super::journal_postings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalPostings.def()
    }
}

impl Related<super::cash_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CashTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
