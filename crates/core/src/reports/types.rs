//! Report query parameters and shared output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tillbook_shared::types::PageRequest;
use uuid::Uuid;

use crate::ledger::PartyKind;

/// Presentation order of report rows.
///
/// Running balances are always computed ascending; this only affects the
/// order rows are handed back in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportOrder {
    /// Oldest first.
    #[default]
    Asc,
    /// Newest first.
    Desc,
}

/// Filter parameters for the ledger/statement engine.
#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    /// Restrict to a party kind (customer or vendor statements). With no
    /// `party_id` this aggregates across all parties of the kind.
    pub party_kind: Option<PartyKind>,
    /// Restrict to one party.
    pub party_id: Option<Uuid>,
    /// Restrict to one account by code.
    pub account_code: Option<String>,
    /// Restrict to one branch.
    pub branch_id: Option<Uuid>,
    /// Start of the date range (opening balance is carried from before).
    pub from: Option<NaiveDate>,
    /// End of the date range.
    pub to: Option<NaiveDate>,
    /// Page to fetch.
    pub page: PageRequest,
}

/// Filter parameters for the daybook engine.
#[derive(Debug, Clone)]
pub struct DaybookQuery {
    /// Restrict to one branch.
    pub branch_id: Option<Uuid>,
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
    /// Presentation order of the day series.
    pub order: ReportOrder,
    /// Page of days to fetch.
    pub page: PageRequest,
}

/// Filter parameters for the cashbook engine.
#[derive(Debug, Clone, Default)]
pub struct CashbookQuery {
    /// Restrict to one branch.
    pub branch_id: Option<Uuid>,
    /// Restrict to one cash/bank account.
    pub account_id: Option<Uuid>,
    /// Start of the date range.
    pub from: Option<NaiveDate>,
    /// End of the date range.
    pub to: Option<NaiveDate>,
    /// Page to fetch.
    pub page: PageRequest,
}
