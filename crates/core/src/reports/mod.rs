//! Read-side report algorithms.
//!
//! Every engine here replays the posting stream (or the cash mirror) into
//! opening balances, running balances, and periodic rollups. The engines
//! are read-only and pure: the db layer fetches rows and aggregates, the
//! algorithms live here.
//!
//! The recurring pattern is "opening, prior-page delta, walk"
//! ([`statement`]): any page of a running-balance feed can be produced
//! without materializing the whole feed, at the cost of one extra
//! aggregate query per page.

pub mod cashbook;
pub mod daybook;
pub mod error;
pub mod pnl;
pub mod statement;
pub mod types;

pub use error::ReportError;
pub use types::{CashbookQuery, DaybookQuery, LedgerQuery, ReportOrder};
