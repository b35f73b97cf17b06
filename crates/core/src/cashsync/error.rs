//! Cash mirror error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::CashTxnStatus;

/// Errors that can occur while maintaining the cash mirror.
#[derive(Debug, Error)]
pub enum CashSyncError {
    /// No account mapping exists for the payment method and branch.
    ///
    /// This is operator-configured data, not a transient fault: the caller
    /// must surface the gap, never retry.
    #[error("No account mapping found for method '{method}'{}", branch_label(.branch_id))]
    NoMappingFound {
        /// The payment method that failed to resolve.
        method: String,
        /// The branch the resolution was attempted for.
        branch_id: Option<Uuid>,
    },

    /// The mirrored amount must be positive.
    #[error("Cash transaction amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A direct expense needs an explicit account or a method to map.
    #[error("Expense entry requires either an account id or a payment method")]
    MissingExpenseAccount,

    /// The requested status change is not permitted.
    #[error("Invalid cash transaction status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: CashTxnStatus,
        /// Requested status.
        to: CashTxnStatus,
    },

    /// The mirror row does not exist (or was already removed).
    #[error("Cash transaction not found: {0}")]
    NotFound(Uuid),
}

fn branch_label(branch_id: &Option<Uuid>) -> String {
    match branch_id {
        Some(id) => format!(" on branch {id}"),
        None => " (global)".to_string(),
    }
}
