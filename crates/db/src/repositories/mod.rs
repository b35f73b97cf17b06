//! Repository abstractions for data access.
//!
//! Repositories own transactions and row locking; every decision with an
//! invariant is delegated to `tillbook-core`.

pub mod account;
pub mod adjustment;
pub mod cash_sync;
pub mod cashbook;
pub mod claim;
pub mod daybook;
pub mod inventory;
pub mod ledger_report;
pub mod pnl;
pub mod posting;
pub mod sales_report;

pub use account::AccountRepository;
pub use adjustment::AdjustmentRepository;
pub use cash_sync::CashSyncRepository;
pub use cashbook::CashbookRepository;
pub use claim::ClaimRepository;
pub use daybook::DaybookRepository;
pub use inventory::InventoryRepository;
pub use ledger_report::LedgerReportRepository;
pub use pnl::PnlRepository;
pub use posting::PostingRepository;
pub use sales_report::SalesReportRepository;
