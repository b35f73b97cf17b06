//! Cash mirror domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::Party;

/// Cash transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashTxnType {
    /// Money in (sales payment, claim receipt).
    Receipt,
    /// Money out (purchase payment, refund).
    Payment,
    /// Direct cash-book expense.
    Expense,
    /// Transfer into this cash/bank account.
    TransferIn,
    /// Transfer out of this cash/bank account.
    TransferOut,
}

impl CashTxnType {
    /// Cash movement direction of this transaction type.
    #[must_use]
    pub const fn direction(self) -> CashDirection {
        match self {
            Self::Receipt | Self::TransferIn => CashDirection::In,
            Self::Payment | Self::Expense | Self::TransferOut => CashDirection::Out,
        }
    }
}

/// Direction of cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashDirection {
    /// Inflow.
    In,
    /// Outflow.
    Out,
}

/// Cash transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashTxnStatus {
    /// Awaiting approval.
    Pending,
    /// Approved.
    Approved,
    /// Voided (terminal).
    Void,
}

impl CashTxnStatus {
    /// Returns true if a transition to `next` is permitted.
    ///
    /// Pending may advance to approved or void; approved may only be
    /// voided; void is terminal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Void) | (Self::Approved, Self::Void)
        )
    }
}

/// The source document that caused a mirror row.
///
/// Replaces the original polymorphic (type, id) pair with a tagged union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SourceDocument {
    /// A payment against a sale.
    SalePayment(Uuid),
    /// A payment against a purchase.
    PurchasePayment(Uuid),
    /// A receipt against a purchase claim.
    ClaimReceipt(Uuid),
    /// A refund against a sale return.
    ReturnRefund(Uuid),
}

impl SourceDocument {
    /// Returns the source kind discriminant.
    #[must_use]
    pub const fn kind(self) -> SourceKind {
        match self {
            Self::SalePayment(_) => SourceKind::SalePayment,
            Self::PurchasePayment(_) => SourceKind::PurchasePayment,
            Self::ClaimReceipt(_) => SourceKind::ClaimReceipt,
            Self::ReturnRefund(_) => SourceKind::ReturnRefund,
        }
    }

    /// Returns the source document id.
    #[must_use]
    pub const fn id(self) -> Uuid {
        match self {
            Self::SalePayment(id)
            | Self::PurchasePayment(id)
            | Self::ClaimReceipt(id)
            | Self::ReturnRefund(id) => id,
        }
    }
}

/// Source document kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Sales payment.
    SalePayment,
    /// Purchase payment.
    PurchasePayment,
    /// Purchase claim receipt.
    ClaimReceipt,
    /// Sale return refund.
    ReturnRefund,
}

/// Sales payment data handed over by the document service.
#[derive(Debug, Clone)]
pub struct PaymentDoc {
    /// Payment id.
    pub id: Uuid,
    /// Amount paid (positive).
    pub amount: Decimal,
    /// Payment method key (e.g. "cash", "card").
    pub method: String,
    /// Date the payment was taken.
    pub paid_on: NaiveDate,
    /// Paying customer, if known.
    pub customer_id: Option<Uuid>,
    /// Free-form reference (receipt no, terminal slip).
    pub reference: Option<String>,
}

/// Purchase payment data handed over by the document service.
#[derive(Debug, Clone)]
pub struct PurchasePaymentDoc {
    /// Purchase payment id.
    pub id: Uuid,
    /// Amount paid (positive).
    pub amount: Decimal,
    /// Payment method key.
    pub method: String,
    /// Date the payment was made.
    pub paid_on: NaiveDate,
    /// Vendor being paid.
    pub vendor_id: Option<Uuid>,
    /// Free-form reference.
    pub reference: Option<String>,
}

/// Purchase claim receipt data (inflow from a vendor).
#[derive(Debug, Clone)]
pub struct ClaimReceiptDoc {
    /// Claim receipt id.
    pub id: Uuid,
    /// Amount received (positive).
    pub amount: Decimal,
    /// Payment method key.
    pub method: String,
    /// Date the money came in.
    pub received_on: NaiveDate,
    /// Vendor refunding the claim.
    pub vendor_id: Option<Uuid>,
    /// Free-form reference.
    pub reference: Option<String>,
}

/// Sale return refund data (outflow to a customer).
#[derive(Debug, Clone)]
pub struct ReturnRefundDoc {
    /// Refund id.
    pub id: Uuid,
    /// Amount refunded (positive).
    pub amount: Decimal,
    /// Payment method key.
    pub method: String,
    /// Date the refund was paid out.
    pub refunded_on: NaiveDate,
    /// Customer receiving the refund.
    pub customer_id: Option<Uuid>,
    /// Free-form reference.
    pub reference: Option<String>,
}

/// A mirror row ready to be persisted.
///
/// The account id is resolved by the persistence boundary via the method
/// mapping before insertion.
#[derive(Debug, Clone)]
pub struct NewCashMirror {
    /// Transaction date.
    pub txn_date: NaiveDate,
    /// Transaction type.
    pub txn_type: CashTxnType,
    /// Amount (always positive; direction comes from the type).
    pub amount: Decimal,
    /// Payment method key.
    pub method: String,
    /// Counterparty, if known.
    pub counterparty: Option<Party>,
    /// The source document this row mirrors.
    pub source: SourceDocument,
    /// Free-form reference.
    pub reference: Option<String>,
}

/// Fields that may change when a source document is edited.
#[derive(Debug, Clone, Default)]
pub struct ResyncFields {
    /// New amount, if changed.
    pub amount: Option<Decimal>,
    /// New method, if changed (re-resolves the account).
    pub method: Option<String>,
    /// New transaction date, if changed.
    pub txn_date: Option<NaiveDate>,
    /// New reference, if changed.
    pub reference: Option<Option<String>>,
}

/// Input for a direct cash-book expense entry.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    /// Expense date.
    pub txn_date: NaiveDate,
    /// Amount (positive).
    pub amount: Decimal,
    /// Explicit cash/bank account, if the caller picked one.
    pub account_id: Option<Uuid>,
    /// Payment method to resolve the account from, if no explicit account.
    pub method: Option<String>,
    /// Branch, if any.
    pub branch_id: Option<Uuid>,
    /// Expense note.
    pub note: Option<String>,
    /// Free-form reference.
    pub reference: Option<String>,
    /// The user recording the expense.
    pub actor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_by_type() {
        assert_eq!(CashTxnType::Receipt.direction(), CashDirection::In);
        assert_eq!(CashTxnType::TransferIn.direction(), CashDirection::In);
        assert_eq!(CashTxnType::Payment.direction(), CashDirection::Out);
        assert_eq!(CashTxnType::Expense.direction(), CashDirection::Out);
        assert_eq!(CashTxnType::TransferOut.direction(), CashDirection::Out);
    }

    #[test]
    fn test_status_transitions() {
        use CashTxnStatus::{Approved, Pending, Void};

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Void));
        assert!(Approved.can_transition_to(Void));

        assert!(!Approved.can_transition_to(Pending));
        assert!(!Void.can_transition_to(Pending));
        assert!(!Void.can_transition_to(Approved));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_source_document_accessors() {
        let id = Uuid::now_v7();
        let src = SourceDocument::SalePayment(id);
        assert_eq!(src.kind(), SourceKind::SalePayment);
        assert_eq!(src.id(), id);
    }
}
