//! Stock movement classification.

use serde::{Deserialize, Serialize};

/// Kind of stock movement recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Inbound purchase receipt (revises the moving average).
    Purchase,
    /// Outbound return to vendor.
    PurchaseReturn,
    /// Outbound sale consumption.
    Sale,
    /// Inbound customer return restock.
    SaleReturn,
    /// Outbound claim of defective purchased goods.
    Claim,
}

impl MovementKind {
    /// Returns true for movements that add quantity.
    #[must_use]
    pub const fn is_inbound(self) -> bool {
        matches!(self, Self::Purchase | Self::SaleReturn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_kinds() {
        assert!(MovementKind::Purchase.is_inbound());
        assert!(MovementKind::SaleReturn.is_inbound());
        assert!(!MovementKind::PurchaseReturn.is_inbound());
        assert!(!MovementKind::Sale.is_inbound());
        assert!(!MovementKind::Claim.is_inbound());
    }
}
