//! `SeaORM` Entity for the journal_entries table.
//!
//! One balanced financial event. Immutable once created except for the
//! status field; exclusively owns its postings (cascade delete).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryStatus, ReferenceKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub entry_date: Date,
    pub memo: Option<String>,
    pub branch_id: Option<Uuid>,
    pub reference_kind: Option<ReferenceKind>,
    pub reference_id: Option<Uuid>,
    pub status: EntryStatus,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_postings::Entity")]
    JournalPostings,
}

impl Related<super::journal_postings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalPostings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
