//! Promotion service: authorization and transition planning.

use uuid::Uuid;

use super::error::PromotionError;
use super::types::{PROMOTION_COST, PromotionPlan, PromotionRequest};

/// Promotion service.
///
/// Decides what a promotion request means for a service in its current
/// state. Persisting the plan, including the ledger debit, is left to the
/// db crate.
pub struct PromotionService;

impl PromotionService {
    /// Check that `user_id` owns the company behind `service_id`.
    ///
    /// # Errors
    ///
    /// Returns `PromotionError::NotOwner` if the ids differ.
    pub fn authorize(owner_id: Uuid, user_id: Uuid, service_id: Uuid) -> Result<(), PromotionError> {
        if owner_id != user_id {
            return Err(PromotionError::NotOwner { service_id });
        }
        Ok(())
    }

    /// Plan the transition for `request` given the current flag.
    #[must_use]
    pub const fn plan(current: bool, request: PromotionRequest) -> PromotionPlan {
        match (current, request.desired(current)) {
            (false, true) => PromotionPlan::Promote {
                cost: PROMOTION_COST,
            },
            (true, false) => PromotionPlan::Demote,
            _ => PromotionPlan::Unchanged,
        }
    }

    /// Audit description for the promotion fee of a service.
    #[must_use]
    pub fn fee_description(service_title: &str) -> String {
        format!("Promotion of service {service_title}")
    }
}
