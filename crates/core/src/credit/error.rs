//! Credit ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::CreditOperation;

/// Errors that can occur during credit operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditError {
    // ========== Validation Errors ==========
    /// Transaction kind is unknown or not accepted by the operation.
    #[error("Invalid transaction type for {operation} credits: {kind}")]
    InvalidTransactionType {
        /// The operation that rejected the kind.
        operation: CreditOperation,
        /// The kind as supplied by the caller.
        kind: String,
    },

    /// Amount is not strictly positive, too large, or has too many
    /// fractional digits.
    #[error(
        "Amount must be between 0.0001 and 999999999999999.9999 with at most 4 decimal places, got {0}"
    )]
    InvalidAmount(Decimal),

    /// Crediting the amount would push the balance or a lifetime total past
    /// the largest storable value.
    #[error("Balance limit exceeded. Balance: {balance}, amount: {amount}")]
    BalanceLimitExceeded {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Amount the operation tried to add.
        amount: Decimal,
    },

    // ========== Account Errors ==========
    /// Company has no credit account.
    #[error("Company has no credit account: {0}")]
    AccountNotFound(Uuid),

    /// Balance is lower than the requested debit.
    #[error("Insufficient credits. Available: {available}, required: {required}")]
    InsufficientCredits {
        /// Balance at the time of the check.
        available: Decimal,
        /// Amount the operation needed.
        required: Decimal,
    },
}

impl CreditError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransactionType { .. } => "INVALID_TRANSACTION_TYPE",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::BalanceLimitExceeded { .. } => "BALANCE_LIMIT_EXCEEDED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientCredits { .. } => "INSUFFICIENT_CREDITS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and business rule errors
            Self::InvalidTransactionType { .. }
            | Self::InvalidAmount(_)
            | Self::BalanceLimitExceeded { .. }
            | Self::InsufficientCredits { .. } => 400,

            // 404 Not Found
            Self::AccountNotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(
        CreditError::InvalidTransactionType { operation: CreditOperation::Earn, kind: "spend".into() },
        "INVALID_TRANSACTION_TYPE",
        400
    )]
    #[case(CreditError::InvalidAmount(dec!(0)), "INVALID_AMOUNT", 400)]
    #[case(
        CreditError::BalanceLimitExceeded { balance: dec!(100), amount: dec!(1) },
        "BALANCE_LIMIT_EXCEEDED",
        400
    )]
    #[case(CreditError::AccountNotFound(Uuid::nil()), "ACCOUNT_NOT_FOUND", 404)]
    #[case(
        CreditError::InsufficientCredits { available: dec!(5), required: dec!(10) },
        "INSUFFICIENT_CREDITS",
        400
    )]
    fn test_error_codes_and_status(
        #[case] err: CreditError,
        #[case] code: &str,
        #[case] status: u16,
    ) {
        assert_eq!(err.error_code(), code);
        assert_eq!(err.http_status_code(), status);
    }

    #[test]
    fn test_error_display() {
        let err = CreditError::InvalidTransactionType {
            operation: CreditOperation::Earn,
            kind: "spend".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid transaction type for earning credits: spend"
        );

        let err = CreditError::InsufficientCredits {
            available: dec!(5.00),
            required: dec!(10.00),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient credits. Available: 5.00, required: 10.00"
        );

        let err = CreditError::InvalidAmount(dec!(1.23456));
        assert_eq!(
            err.to_string(),
            "Amount must be between 0.0001 and 999999999999999.9999 with at most 4 decimal places, got 1.23456"
        );
    }
}
