//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Domain errors (credit rules, promotion) carry their own codes; this type
/// covers the failures every handler can hit regardless of domain.
#[derive(Debug, Error)]
pub enum AppError {
    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the message safe to show to API clients.
    ///
    /// Server-side failures never leak their details.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "An error occurred".to_string(),
            Self::Forbidden(_) => self.to_string(),
        }
    }
}
