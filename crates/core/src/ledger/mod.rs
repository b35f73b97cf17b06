//! Double-entry posting logic.
//!
//! This module implements the write-side core of the ledger:
//! - Posting line and journal input types
//! - Tagged unions for parties and document references
//! - The balance validation every journal entry must pass
//! - Error types for posting operations

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{
    DocumentRef, EntryStatus, EntryTotals, JournalInput, Party, PartyKind, PostingLine,
};
