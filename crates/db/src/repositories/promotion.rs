//! Promotion repository: settles a service's promotion flag.
//!
//! The service row is locked, the fee is debited from the owning company's
//! ledger account and the flag is written, all in one database transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use bizlink_core::credit::CreditTransactionType;
use bizlink_core::promotion::{PromotionError, PromotionPlan, PromotionRequest, PromotionService};

use super::credit::{CreditRepository, CreditRepositoryError};
use crate::entities::{companies, services};

/// Error types for promotion settlement.
#[derive(Debug, thiserror::Error)]
pub enum PromotionRepositoryError {
    /// Business rule violation.
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CreditRepositoryError> for PromotionRepositoryError {
    fn from(err: CreditRepositoryError) -> Self {
        match err {
            CreditRepositoryError::Credit(e) => Self::Promotion(e.into()),
            CreditRepositoryError::Database(e) => Self::Database(e),
        }
    }
}

/// Promotion repository.
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    db: DatabaseConnection,
}

impl PromotionRepository {
    /// Creates a new promotion repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a promotion request on behalf of `user_id`.
    ///
    /// - Desired flag equals the current one: returns the service unchanged.
    /// - false to true: debits the promotion fee, creating the account if
    ///   needed, then sets the flag.
    /// - true to false: clears the flag; no ledger interaction, no refund.
    ///
    /// # Errors
    ///
    /// Returns `PromotionError::ServiceNotFound`,
    /// `PromotionError::CompanyNotFound`, `PromotionError::NotOwner`,
    /// `PromotionError::Credit` (e.g. insufficient credits), or a database
    /// error. On error the flag and the ledger are unchanged.
    pub async fn set_promotion(
        &self,
        service_id: Uuid,
        user_id: Uuid,
        request: PromotionRequest,
    ) -> Result<services::Model, PromotionRepositoryError> {
        let txn = self.db.begin().await?;

        let service = services::Entity::find_by_id(service_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PromotionError::ServiceNotFound(service_id))?;

        let company = companies::Entity::find_by_id(service.company_id)
            .one(&txn)
            .await?
            .ok_or(PromotionError::CompanyNotFound(service.company_id))?;

        PromotionService::authorize(company.owner_id, user_id, service_id)?;

        let current = service.is_promoted;
        let plan = PromotionService::plan(current, request);

        match plan {
            PromotionPlan::Unchanged => return Ok(service),
            PromotionPlan::Promote { cost } => {
                let account = CreditRepository::lock_or_create_account(&txn, company.id).await?;
                CreditRepository::apply_in_txn(
                    &txn,
                    account,
                    CreditTransactionType::Spend,
                    cost,
                    Some(PromotionService::fee_description(&service.title)),
                )
                .await?;
            }
            PromotionPlan::Demote => {}
        }

        let mut active: services::ActiveModel = service.into();
        active.is_promoted = Set(plan.resulting_flag(current));
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            %service_id,
            company_id = %company.id,
            is_promoted = updated.is_promoted,
            fee = %plan.cost(),
            "Service promotion updated"
        );

        Ok(updated)
    }
}
