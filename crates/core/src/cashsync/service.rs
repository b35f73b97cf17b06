//! Cash mirror construction and method mapping resolution.

use uuid::Uuid;

use super::error::CashSyncError;
use super::types::{
    CashTxnStatus, CashTxnType, ClaimReceiptDoc, NewCashMirror, PaymentDoc, PurchasePaymentDoc,
    ReturnRefundDoc, SourceDocument,
};
use crate::ledger::Party;
use rust_decimal::Decimal;

/// Pure cash mirror logic.
///
/// The persistence boundary fetches mapping candidates and existing rows;
/// every decision with an invariant is made here.
pub struct CashSyncService;

impl CashSyncService {
    /// Resolves a payment method to an account id.
    ///
    /// Resolution order: (a) the branch-specific mapping, (b) the global
    /// mapping (no branch). Fails with [`CashSyncError::NoMappingFound`]
    /// naming the method and branch when neither exists.
    ///
    /// # Errors
    ///
    /// Returns `NoMappingFound` when no candidate is available.
    pub fn resolve_method_account(
        method: &str,
        branch_id: Option<Uuid>,
        branch_mapping: Option<Uuid>,
        global_mapping: Option<Uuid>,
    ) -> Result<Uuid, CashSyncError> {
        branch_mapping.or(global_mapping).ok_or_else(|| {
            CashSyncError::NoMappingFound {
                method: method.to_string(),
                branch_id,
            }
        })
    }

    /// Builds a `receipt` mirror for a sales payment.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` if the payment amount is not positive.
    pub fn mirror_from_payment(doc: &PaymentDoc) -> Result<NewCashMirror, CashSyncError> {
        Self::check_amount(doc.amount)?;
        Ok(NewCashMirror {
            txn_date: doc.paid_on,
            txn_type: CashTxnType::Receipt,
            amount: doc.amount,
            method: doc.method.clone(),
            counterparty: doc.customer_id.map(Party::Customer),
            source: SourceDocument::SalePayment(doc.id),
            reference: doc.reference.clone(),
        })
    }

    /// Builds a `payment` mirror for a purchase payment.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` if the amount is not positive.
    pub fn mirror_from_purchase_payment(
        doc: &PurchasePaymentDoc,
    ) -> Result<NewCashMirror, CashSyncError> {
        Self::check_amount(doc.amount)?;
        Ok(NewCashMirror {
            txn_date: doc.paid_on,
            txn_type: CashTxnType::Payment,
            amount: doc.amount,
            method: doc.method.clone(),
            counterparty: doc.vendor_id.map(Party::Vendor),
            source: SourceDocument::PurchasePayment(doc.id),
            reference: doc.reference.clone(),
        })
    }

    /// Builds a `receipt` mirror for a purchase claim receipt.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` if the amount is not positive.
    pub fn mirror_from_claim_receipt(
        doc: &ClaimReceiptDoc,
    ) -> Result<NewCashMirror, CashSyncError> {
        Self::check_amount(doc.amount)?;
        Ok(NewCashMirror {
            txn_date: doc.received_on,
            txn_type: CashTxnType::Receipt,
            amount: doc.amount,
            method: doc.method.clone(),
            counterparty: doc.vendor_id.map(Party::Vendor),
            source: SourceDocument::ClaimReceipt(doc.id),
            reference: doc.reference.clone(),
        })
    }

    /// Builds a `payment` mirror for a sale return refund.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveAmount` if the amount is not positive.
    pub fn mirror_from_return_refund(
        doc: &ReturnRefundDoc,
    ) -> Result<NewCashMirror, CashSyncError> {
        Self::check_amount(doc.amount)?;
        Ok(NewCashMirror {
            txn_date: doc.refunded_on,
            txn_type: CashTxnType::Payment,
            amount: doc.amount,
            method: doc.method.clone(),
            counterparty: doc.customer_id.map(Party::Customer),
            source: SourceDocument::ReturnRefund(doc.id),
            reference: doc.reference.clone(),
        })
    }

    /// Validates a status transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` when the move is not permitted.
    pub fn validate_transition(
        from: CashTxnStatus,
        to: CashTxnStatus,
    ) -> Result<(), CashSyncError> {
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(CashSyncError::InvalidStatusTransition { from, to })
        }
    }

    fn check_amount(amount: Decimal) -> Result<(), CashSyncError> {
        if amount <= Decimal::ZERO {
            return Err(CashSyncError::NonPositiveAmount(amount));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn payment(amount: Decimal) -> PaymentDoc {
        PaymentDoc {
            id: Uuid::now_v7(),
            amount,
            method: "cash".to_string(),
            paid_on: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            customer_id: Some(Uuid::now_v7()),
            reference: Some("RCPT-001".to_string()),
        }
    }

    #[test]
    fn test_resolve_prefers_branch_mapping() {
        let branch = Uuid::now_v7();
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        let resolved =
            CashSyncService::resolve_method_account("cash", Some(branch), Some(a), Some(b))
                .unwrap();
        assert_eq!(resolved, a);
    }

    #[test]
    fn test_resolve_falls_back_to_global() {
        let b = Uuid::now_v7();
        let resolved =
            CashSyncService::resolve_method_account("cash", Some(Uuid::now_v7()), None, Some(b))
                .unwrap();
        assert_eq!(resolved, b);
    }

    #[test]
    fn test_resolve_no_mapping() {
        let branch = Uuid::now_v7();
        let err = CashSyncService::resolve_method_account("bank", Some(branch), None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            CashSyncError::NoMappingFound { ref method, branch_id }
                if method == "bank" && branch_id == Some(branch)
        ));
    }

    #[test]
    fn test_mirror_from_payment_is_receipt() {
        let doc = payment(dec!(150.00));
        let mirror = CashSyncService::mirror_from_payment(&doc).unwrap();

        assert_eq!(mirror.txn_type, CashTxnType::Receipt);
        assert_eq!(mirror.amount, dec!(150.00));
        assert_eq!(mirror.source, SourceDocument::SalePayment(doc.id));
        assert!(matches!(mirror.counterparty, Some(Party::Customer(_))));
    }

    #[test]
    fn test_mirror_from_purchase_payment_is_outflow() {
        let doc = PurchasePaymentDoc {
            id: Uuid::now_v7(),
            amount: dec!(90),
            method: "bank".to_string(),
            paid_on: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
            vendor_id: Some(Uuid::now_v7()),
            reference: None,
        };
        let mirror = CashSyncService::mirror_from_purchase_payment(&doc).unwrap();

        assert_eq!(mirror.txn_type, CashTxnType::Payment);
        assert!(matches!(mirror.counterparty, Some(Party::Vendor(_))));
        assert_eq!(mirror.source, SourceDocument::PurchasePayment(doc.id));
    }

    #[test]
    fn test_mirror_rejects_non_positive_amount() {
        let doc = payment(dec!(0));
        assert!(matches!(
            CashSyncService::mirror_from_payment(&doc),
            Err(CashSyncError::NonPositiveAmount(_))
        ));

        let doc = payment(dec!(-10));
        assert!(matches!(
            CashSyncService::mirror_from_payment(&doc),
            Err(CashSyncError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_claim_receipt_and_refund_directions() {
        let claim = ClaimReceiptDoc {
            id: Uuid::now_v7(),
            amount: dec!(40),
            method: "cash".to_string(),
            received_on: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
            vendor_id: None,
            reference: None,
        };
        let mirror = CashSyncService::mirror_from_claim_receipt(&claim).unwrap();
        assert_eq!(mirror.txn_type, CashTxnType::Receipt);

        let refund = ReturnRefundDoc {
            id: Uuid::now_v7(),
            amount: dec!(25),
            method: "cash".to_string(),
            refunded_on: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
            customer_id: None,
            reference: None,
        };
        let mirror = CashSyncService::mirror_from_return_refund(&refund).unwrap();
        assert_eq!(mirror.txn_type, CashTxnType::Payment);
    }

    #[test]
    fn test_validate_transition() {
        assert!(CashSyncService::validate_transition(
            CashTxnStatus::Pending,
            CashTxnStatus::Approved
        )
        .is_ok());
        assert!(matches!(
            CashSyncService::validate_transition(CashTxnStatus::Void, CashTxnStatus::Approved),
            Err(CashSyncError::InvalidStatusTransition { .. })
        ));
    }
}
