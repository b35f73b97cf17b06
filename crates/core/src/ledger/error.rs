//! Ledger error types for posting validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during posting operations.
///
/// All of these abort the calling operation before or with a full rollback;
/// none are retried by the core. They indicate caller bugs or data
/// configuration gaps, not transient faults.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A journal entry must have at least one line.
    #[error("Journal entry must have at least one posting line")]
    EmptyEntry,

    /// Debit and credit sums differ beyond 2-decimal tolerance.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A line has a negative debit or credit amount.
    #[error("Posting line {index} has a negative amount")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// A line has neither a debit nor a credit amount.
    #[error("Posting line {index} has neither a debit nor a credit amount")]
    EmptyLine {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// An account code does not resolve to an existing account.
    #[error("Unknown account code: {0}")]
    UnknownAccount(String),

    /// The referenced journal entry does not exist.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(uuid::Uuid),
}

impl LedgerError {
    /// Returns the error code for structured logs and API payloads.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::EmptyLine { .. } => "EMPTY_LINE",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display_carries_context() {
        let err = LedgerError::UnbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 50.00"
        );

        let err = LedgerError::UnknownAccount("9999".to_string());
        assert_eq!(err.to_string(), "Unknown account code: 9999");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::EmptyEntry.error_code(), "EMPTY_ENTRY");
        assert_eq!(
            LedgerError::UnknownAccount(String::new()).error_code(),
            "UNKNOWN_ACCOUNT"
        );
    }
}
