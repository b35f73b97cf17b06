//! Ledger service for journal entry validation.
//!
//! This module provides the core business logic for validating journal
//! entries before they are persisted. It contains pure logic with no
//! database dependencies; account existence is checked by the persistence
//! boundary before its transaction starts.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalInput, PostingLine};

/// Ledger service for journal entry validation.
///
/// This is the single line of defense for the balance invariant: every
/// component that writes postings (document posting, cash expenses,
/// adjustments) must route through this validation, never write postings
/// directly.
pub struct LedgerService;

impl LedgerService {
    /// Validates a journal entry input before persistence.
    ///
    /// Checks, in order:
    /// 1. The entry has at least one line
    /// 2. Every line has non-negative amounts and is not empty
    /// 3. Debit and credit sums balance at 2-decimal precision
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` describing the first structural violation, or
    /// `UnbalancedEntry` with both sums when the totals differ.
    pub fn validate(input: &JournalInput) -> Result<EntryTotals, LedgerError> {
        if input.lines.is_empty() {
            return Err(LedgerError::EmptyEntry);
        }

        for (index, line) in input.lines.iter().enumerate() {
            Self::validate_line(index, line)?;
        }

        let totals = Self::calculate_totals(&input.lines);
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        Ok(totals)
    }

    /// Validates a single posting line.
    fn validate_line(index: usize, line: &PostingLine) -> Result<(), LedgerError> {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { index });
        }
        // Both sides may be nonzero (net display), but a line carrying
        // nothing at all is a caller bug.
        if line.debit == Decimal::ZERO && line.credit == Decimal::ZERO {
            return Err(LedgerError::EmptyLine { index });
        }
        Ok(())
    }

    /// Calculates entry totals from posting lines.
    #[must_use]
    pub fn calculate_totals(lines: &[PostingLine]) -> EntryTotals {
        let debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let credit: Decimal = lines.iter().map(|l| l.credit).sum();

        EntryTotals::new(debit, credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::Party;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_input(lines: Vec<PostingLine>) -> JournalInput {
        JournalInput {
            branch_id: None,
            entry_date: None,
            memo: "Test entry".to_string(),
            reference: None,
            lines,
            actor_id: Some(Uuid::now_v7()),
        }
    }

    #[test]
    fn test_validate_balanced_entry() {
        let input = make_input(vec![
            PostingLine::debit("1010", dec!(100)),
            PostingLine::credit("4000", dec!(100)),
        ]);

        let totals = LedgerService::validate(&input).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit, dec!(100));
        assert_eq!(totals.credit, dec!(100));
    }

    #[test]
    fn test_validate_unbalanced_entry() {
        let input = make_input(vec![
            PostingLine::debit("1010", dec!(100)),
            PostingLine::credit("4000", dec!(50)),
        ]);

        assert!(matches!(
            LedgerService::validate(&input),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
    }

    #[test]
    fn test_validate_empty_entry() {
        let input = make_input(vec![]);
        assert!(matches!(
            LedgerService::validate(&input),
            Err(LedgerError::EmptyEntry)
        ));
    }

    #[test]
    fn test_validate_negative_amount() {
        let input = make_input(vec![
            PostingLine::debit("1010", dec!(-100)),
            PostingLine::credit("4000", dec!(-100)),
        ]);
        assert!(matches!(
            LedgerService::validate(&input),
            Err(LedgerError::NegativeAmount { index: 0 })
        ));
    }

    #[test]
    fn test_validate_empty_line() {
        let input = make_input(vec![
            PostingLine::debit("1010", dec!(100)),
            PostingLine::debit("1020", dec!(0)),
            PostingLine::credit("4000", dec!(100)),
        ]);
        assert!(matches!(
            LedgerService::validate(&input),
            Err(LedgerError::EmptyLine { index: 1 })
        ));
    }

    #[test]
    fn test_validate_sub_cent_tolerance() {
        // 100.004 and 100.001 both round to 100.00 at 2 decimals.
        let input = make_input(vec![
            PostingLine::debit("1010", dec!(100.004)),
            PostingLine::credit("4000", dec!(100.001)),
        ]);
        assert!(LedgerService::validate(&input).is_ok());

        // A full cent apart is rejected.
        let input = make_input(vec![
            PostingLine::debit("1010", dec!(100.01)),
            PostingLine::credit("4000", dec!(100.00)),
        ]);
        assert!(matches!(
            LedgerService::validate(&input),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
    }

    #[test]
    fn test_validate_line_with_both_sides() {
        // Both debit and credit on one line is allowed (net display).
        let input = make_input(vec![
            PostingLine {
                account_code: "1100".to_string(),
                debit: dec!(100),
                credit: dec!(25),
                party: Some(Party::Customer(Uuid::now_v7())),
            },
            PostingLine::credit("4000", dec!(75)),
        ]);
        assert!(LedgerService::validate(&input).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any set of amounts mirrored onto both sides, validation
        /// succeeds and the totals are equal.
        #[test]
        fn prop_mirrored_lines_always_balance(
            amounts in prop::collection::vec(1i64..1_000_000, 1..20),
        ) {
            let mut lines = Vec::new();
            for n in &amounts {
                let amount = Decimal::new(*n, 2);
                lines.push(PostingLine::debit("1010", amount));
                lines.push(PostingLine::credit("4000", amount));
            }
            let input = make_input(lines);

            let totals = LedgerService::validate(&input).unwrap();
            prop_assert!(totals.is_balanced);
            prop_assert_eq!(totals.debit, totals.credit);
        }

        /// Perturbing one side by at least a cent always fails validation.
        #[test]
        fn prop_cent_perturbation_is_unbalanced(
            n in 1i64..1_000_000,
            extra in 1i64..1_000,
        ) {
            let amount = Decimal::new(n, 2);
            let input = make_input(vec![
                PostingLine::debit("1010", amount + Decimal::new(extra, 2)),
                PostingLine::credit("4000", amount),
            ]);
            let is_unbalanced = matches!(
                LedgerService::validate(&input),
                Err(LedgerError::UnbalancedEntry { .. })
            );
            prop_assert!(is_unbalanced);
        }
    }
}
