//! Purchase claim quantity validation.
//!
//! A claim line may not request more than the remaining claimable quantity
//! of its purchase item (purchased minus already claimed). Violations are
//! collected per line and reported together; nothing is committed when any
//! line violates (all-or-nothing per request).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// One requested claim line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimLine {
    /// The purchase item being claimed against.
    pub purchase_item_id: Uuid,
    /// Quantity claimed (positive).
    pub quantity: Decimal,
}

/// A line that exceeds its remaining claimable quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimViolation {
    /// The purchase item.
    pub purchase_item_id: Uuid,
    /// Quantity requested by the claim line.
    pub requested: Decimal,
    /// Quantity still claimable (purchased - already claimed).
    pub remaining: Decimal,
}

/// Errors that can occur during claim validation and approval.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// A claim must have at least one line.
    #[error("Claim must have at least one line")]
    EmptyClaim,

    /// A line requested a non-positive quantity.
    #[error("Claim line for purchase item {0} has a non-positive quantity")]
    NonPositiveQuantity(Uuid),

    /// A line referenced a purchase item outside the claimed purchase.
    #[error("Purchase item not found: {0}")]
    UnknownPurchaseItem(Uuid),

    /// One or more lines exceed the remaining claimable quantity.
    ///
    /// All violating lines are listed; no line of the request is committed.
    #[error("Claim exceeds remaining claimable quantity: {}", format_violations(.violations))]
    OverQuantity {
        /// Every violating line of the request.
        violations: Vec<ClaimViolation>,
    },

    /// The claim does not exist.
    #[error("Claim not found: {0}")]
    NotFound(Uuid),

    /// The claim was already approved.
    #[error("Claim {0} is already approved")]
    AlreadyApproved(Uuid),
}

fn format_violations(violations: &[ClaimViolation]) -> String {
    violations
        .iter()
        .map(|v| {
            format!(
                "item {} requested {} but only {} remaining",
                v.purchase_item_id, v.requested, v.remaining
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates claim lines against the remaining claimable quantity per
/// purchase item.
///
/// `remaining` maps each purchase item of the claimed purchase to its
/// purchased-minus-claimed quantity, read under row lock by the caller.
///
/// # Errors
///
/// Returns the first structural error (empty claim, non-positive quantity,
/// unknown item), or `OverQuantity` aggregating every violating line.
pub fn validate_claim_lines(
    lines: &[ClaimLine],
    remaining: &HashMap<Uuid, Decimal>,
) -> Result<(), ClaimError> {
    if lines.is_empty() {
        return Err(ClaimError::EmptyClaim);
    }

    let mut violations = Vec::new();
    // Multiple lines against the same item count cumulatively.
    let mut requested_so_far: HashMap<Uuid, Decimal> = HashMap::new();

    for line in lines {
        if line.quantity <= Decimal::ZERO {
            return Err(ClaimError::NonPositiveQuantity(line.purchase_item_id));
        }

        let Some(&available) = remaining.get(&line.purchase_item_id) else {
            return Err(ClaimError::UnknownPurchaseItem(line.purchase_item_id));
        };

        let prior = requested_so_far
            .get(&line.purchase_item_id)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let requested = prior + line.quantity;
        requested_so_far.insert(line.purchase_item_id, requested);

        if requested > available {
            violations.push(ClaimViolation {
                purchase_item_id: line.purchase_item_id,
                requested,
                remaining: available,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ClaimError::OverQuantity { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn remaining_of(entries: &[(Uuid, Decimal)]) -> HashMap<Uuid, Decimal> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_claim_within_remaining() {
        let item = Uuid::now_v7();
        let remaining = remaining_of(&[(item, dec!(10))]);
        let lines = vec![ClaimLine {
            purchase_item_id: item,
            quantity: dec!(6),
        }];

        assert!(validate_claim_lines(&lines, &remaining).is_ok());
    }

    #[test]
    fn test_claim_over_remaining() {
        // Bought 10, 6 already claimed: remaining is 4 and a claim of 5
        // must fail naming that line.
        let item = Uuid::now_v7();
        let remaining = remaining_of(&[(item, dec!(4))]);
        let lines = vec![ClaimLine {
            purchase_item_id: item,
            quantity: dec!(5),
        }];

        let err = validate_claim_lines(&lines, &remaining).unwrap_err();
        match err {
            ClaimError::OverQuantity { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].purchase_item_id, item);
                assert_eq!(violations[0].requested, dec!(5));
                assert_eq!(violations[0].remaining, dec!(4));
            }
            other => panic!("expected OverQuantity, got {other:?}"),
        }
    }

    #[test]
    fn test_all_violations_reported_together() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let c = Uuid::now_v7();
        let remaining = remaining_of(&[(a, dec!(1)), (b, dec!(10)), (c, dec!(0))]);
        let lines = vec![
            ClaimLine {
                purchase_item_id: a,
                quantity: dec!(2),
            },
            ClaimLine {
                purchase_item_id: b,
                quantity: dec!(5),
            },
            ClaimLine {
                purchase_item_id: c,
                quantity: dec!(1),
            },
        ];

        let err = validate_claim_lines(&lines, &remaining).unwrap_err();
        match err {
            ClaimError::OverQuantity { violations } => {
                let ids: Vec<Uuid> = violations.iter().map(|v| v.purchase_item_id).collect();
                assert_eq!(ids, vec![a, c]);
            }
            other => panic!("expected OverQuantity, got {other:?}"),
        }
    }

    #[test]
    fn test_cumulative_lines_against_same_item() {
        let item = Uuid::now_v7();
        let remaining = remaining_of(&[(item, dec!(10))]);
        let lines = vec![
            ClaimLine {
                purchase_item_id: item,
                quantity: dec!(6),
            },
            ClaimLine {
                purchase_item_id: item,
                quantity: dec!(5),
            },
        ];

        // 6 + 5 = 11 > 10, even though each line alone fits.
        assert!(matches!(
            validate_claim_lines(&lines, &remaining),
            Err(ClaimError::OverQuantity { .. })
        ));
    }

    #[test]
    fn test_empty_claim() {
        assert!(matches!(
            validate_claim_lines(&[], &HashMap::new()),
            Err(ClaimError::EmptyClaim)
        ));
    }

    #[test]
    fn test_unknown_purchase_item() {
        let lines = vec![ClaimLine {
            purchase_item_id: Uuid::now_v7(),
            quantity: dec!(1),
        }];
        assert!(matches!(
            validate_claim_lines(&lines, &HashMap::new()),
            Err(ClaimError::UnknownPurchaseItem(_))
        ));
    }

    #[test]
    fn test_non_positive_quantity() {
        let item = Uuid::now_v7();
        let remaining = remaining_of(&[(item, dec!(10))]);
        let lines = vec![ClaimLine {
            purchase_item_id: item,
            quantity: dec!(0),
        }];
        assert!(matches!(
            validate_claim_lines(&lines, &remaining),
            Err(ClaimError::NonPositiveQuantity(_))
        ));
    }

    #[test]
    fn test_over_quantity_message_lists_lines() {
        let item = Uuid::now_v7();
        let remaining = remaining_of(&[(item, dec!(4))]);
        let lines = vec![ClaimLine {
            purchase_item_id: item,
            quantity: dec!(5),
        }];

        let msg = validate_claim_lines(&lines, &remaining)
            .unwrap_err()
            .to_string();
        assert!(msg.contains(&item.to_string()));
        assert!(msg.contains("requested 5"));
        assert!(msg.contains("only 4 remaining"));
    }
}
