//! Ledger domain types for journal entry creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The customer or vendor a receivable/payable posting is attributed to,
/// for sub-ledger (statement) purposes.
///
/// Replaces the original polymorphic (type, id) pair with a tagged union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Party {
    /// A customer (receivable side).
    Customer(Uuid),
    /// A vendor (payable side).
    Vendor(Uuid),
}

impl Party {
    /// Returns the party kind discriminant.
    #[must_use]
    pub const fn kind(self) -> PartyKind {
        match self {
            Self::Customer(_) => PartyKind::Customer,
            Self::Vendor(_) => PartyKind::Vendor,
        }
    }

    /// Returns the party id.
    #[must_use]
    pub const fn id(self) -> Uuid {
        match self {
            Self::Customer(id) | Self::Vendor(id) => id,
        }
    }
}

/// Party kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    /// Customer.
    Customer,
    /// Vendor.
    Vendor,
}

/// The business document a journal entry originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DocumentRef {
    /// A sales invoice.
    Sale(Uuid),
    /// A purchase bill.
    Purchase(Uuid),
    /// A sale return.
    SaleReturn(Uuid),
    /// A purchase claim.
    PurchaseClaim(Uuid),
}

impl DocumentRef {
    /// Returns the referenced document id.
    #[must_use]
    pub const fn id(self) -> Uuid {
        match self {
            Self::Sale(id) | Self::Purchase(id) | Self::SaleReturn(id) | Self::PurchaseClaim(id) => {
                id
            }
        }
    }
}

/// Journal entry status.
///
/// Entries are immutable once created; the status field is the one narrow
/// post-hoc mutation permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is posted (the default on creation).
    Posted,
    /// Entry has been voided.
    Void,
}

/// One debit-or-credit line within a journal entry, tied to one account
/// by its stable code.
///
/// Exactly one of debit/credit is typically nonzero, but both may be
/// present for net display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingLine {
    /// Stable account code (resolved to an account at the boundary).
    pub account_code: String,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Optional party for receivable/payable sub-ledgers.
    pub party: Option<Party>,
}

impl PostingLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
            party: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
            party: None,
        }
    }

    /// Attaches a party to the line.
    #[must_use]
    pub fn with_party(mut self, party: Party) -> Self {
        self.party = Some(party);
        self
    }

    /// Net movement of this line (debit minus credit).
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct JournalInput {
    /// Branch the entry belongs to, if any.
    pub branch_id: Option<Uuid>,
    /// Nominal entry date; defaults to today at the persistence boundary.
    pub entry_date: Option<NaiveDate>,
    /// Human-readable memo.
    pub memo: String,
    /// Originating business document, if any.
    pub reference: Option<DocumentRef>,
    /// The posting lines (non-empty, balanced).
    pub lines: Vec<PostingLine>,
    /// The user performing the operation. Passed explicitly; the core
    /// never reads ambient session state.
    pub actor_id: Option<Uuid>,
}

/// Totals of a journal entry's lines.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the entry is balanced at 2-decimal precision.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: tillbook_shared::types::sums_balance(debit, credit),
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_party_accessors() {
        let id = Uuid::now_v7();
        assert_eq!(Party::Customer(id).kind(), PartyKind::Customer);
        assert_eq!(Party::Vendor(id).kind(), PartyKind::Vendor);
        assert_eq!(Party::Customer(id).id(), id);
    }

    #[test]
    fn test_posting_line_builders() {
        let line = PostingLine::debit("1010", dec!(50));
        assert_eq!(line.debit, dec!(50));
        assert_eq!(line.credit, dec!(0));
        assert_eq!(line.net(), dec!(50));

        let party = Party::Vendor(Uuid::now_v7());
        let line = PostingLine::credit("2100", dec!(50)).with_party(party);
        assert_eq!(line.net(), dec!(-50));
        assert_eq!(line.party, Some(party));
    }

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), dec!(0));
    }

    #[test]
    fn test_entry_totals_tolerates_sub_cent() {
        // Sums within half a cent of each other round to the same value.
        let totals = EntryTotals::new(dec!(100.001), dec!(100.004));
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }
}
