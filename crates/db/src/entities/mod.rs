//! `SeaORM` entity definitions.

pub mod accounts;
pub mod cash_transactions;
pub mod journal_entries;
pub mod journal_postings;
pub mod payment_method_accounts;
pub mod product_stocks;
pub mod purchase_claim_items;
pub mod purchase_claims;
pub mod purchase_items;
pub mod sea_orm_active_enums;
pub mod stock_movements;
