//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{round_money, sums_balance, MONEY_DP};
pub use pagination::{PageMeta, PageRequest, PageResponse};
