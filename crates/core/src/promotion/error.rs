//! Promotion settlement error types.

use thiserror::Error;
use uuid::Uuid;

use crate::credit::CreditError;

/// Errors that can occur while changing a service's promotion flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromotionError {
    /// Service does not exist.
    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    /// Owning company does not exist.
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    /// Caller does not own the company behind the service.
    #[error("You are not allowed to change the promotion of service {service_id}")]
    NotOwner {
        /// The service the caller tried to change.
        service_id: Uuid,
    },

    /// The promotion fee could not be settled.
    #[error(transparent)]
    Credit(#[from] CreditError),
}

impl PromotionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            Self::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            Self::NotOwner { .. } => "FORBIDDEN",
            Self::Credit(err) => err.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::ServiceNotFound(_) | Self::CompanyNotFound(_) => 404,
            Self::NotOwner { .. } => 403,
            Self::Credit(err) => err.http_status_code(),
        }
    }
}
