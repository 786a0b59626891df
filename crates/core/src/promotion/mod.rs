//! Service promotion settlement rules.
//!
//! Promoting a service (false to true) costs a fixed credit fee paid from the
//! owning company's ledger account. Demoting is free and never refunds.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PromotionError;
pub use service::PromotionService;
pub use types::{PROMOTION_COST, PromotionPlan, PromotionRequest};
