//! Cash-transaction mirror logic.
//!
//! The cash mirror is a denormalized read model: one `CashTransaction` row
//! per cash-affecting source document, so the cashbook can show a simple
//! in/out feed without replaying double-entry postings. This module holds
//! the pure half: mirror construction from source-document data, method →
//! account resolution precedence, and the status state machine. The db
//! layer persists what is built here.

pub mod error;
pub mod service;
pub mod types;

pub use error::CashSyncError;
pub use service::CashSyncService;
pub use types::{
    CashDirection, CashTxnStatus, CashTxnType, ClaimReceiptDoc, ExpenseInput, NewCashMirror,
    PaymentDoc, PurchasePaymentDoc, ResyncFields, ReturnRefundDoc, SourceDocument, SourceKind,
};
