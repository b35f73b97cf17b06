//! Moving-average inventory costing.
//!
//! Unit cost is recomputed as a weighted average on every purchase receipt
//! and held constant on outbound movements. Quantities are deliberately
//! unclamped: oversell and over-return drive on-hand negative instead of
//! blocking, surfacing the discrepancy to operators.

pub mod costing;
pub mod types;

pub use costing::{consume, receive, restock, StockLevel};
pub use types::MovementKind;
