//! Credit service for request validation and balance arithmetic.
//!
//! The db crate loads and locks the account row, asks this service for the
//! resulting mutation, then persists the new balance and the audit record in
//! the same transaction.

use rust_decimal::Decimal;

use super::error::CreditError;
use super::types::{
    AMOUNT_SCALE, AccountBalance, BalanceMutation, CreditOperation, CreditTransactionType,
    MAX_AMOUNT,
};

/// Credit service for validating and applying balance mutations.
///
/// This service contains pure business logic with no database dependencies.
pub struct CreditService;

impl CreditService {
    /// Validate an earn or spend request before touching the store.
    ///
    /// The kind is checked first, then the amount.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidTransactionType` if the kind is not
    /// accepted by `operation`, or `CreditError::InvalidAmount` if the amount
    /// is not valid.
    pub fn validate(
        operation: CreditOperation,
        raw_kind: &str,
        amount: Decimal,
    ) -> Result<CreditTransactionType, CreditError> {
        let kind = operation.parse_kind(raw_kind)?;
        Self::validate_amount(amount)?;
        Ok(kind)
    }

    /// Validate that an amount is strictly positive and fits the stored
    /// precision: at most `MAX_AMOUNT` with at most four fractional digits.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidAmount` otherwise.
    pub fn validate_amount(amount: Decimal) -> Result<(), CreditError> {
        if amount <= Decimal::ZERO
            || amount > MAX_AMOUNT
            || amount.normalize().scale() > AMOUNT_SCALE
        {
            return Err(CreditError::InvalidAmount(amount));
        }
        Ok(())
    }

    /// Apply one transaction to the current account state.
    ///
    /// Debits are checked against the current balance before anything is
    /// computed, so a rejected debit leaves no trace. No column may end up
    /// above `MAX_AMOUNT`.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidAmount` for an invalid amount,
    /// `CreditError::InsufficientCredits` if a debit exceeds the balance, and
    /// `CreditError::BalanceLimitExceeded` if the balance or a lifetime total
    /// would pass `MAX_AMOUNT`.
    pub fn apply(
        state: AccountBalance,
        kind: CreditTransactionType,
        amount: Decimal,
    ) -> Result<BalanceMutation, CreditError> {
        Self::validate_amount(amount)?;

        let limit_exceeded = move || CreditError::BalanceLimitExceeded {
            balance: state.balance,
            amount,
        };

        let new_state = if kind.is_credit() {
            AccountBalance {
                balance: bounded_add(state.balance, amount).ok_or_else(limit_exceeded)?,
                total_earned: bounded_add(state.total_earned, amount)
                    .ok_or_else(limit_exceeded)?,
                total_spent: state.total_spent,
            }
        } else {
            if state.balance < amount {
                return Err(CreditError::InsufficientCredits {
                    available: state.balance,
                    required: amount,
                });
            }
            AccountBalance {
                balance: state
                    .balance
                    .checked_sub(amount)
                    .ok_or_else(limit_exceeded)?,
                total_earned: state.total_earned,
                total_spent: bounded_add(state.total_spent, amount).ok_or_else(limit_exceeded)?,
            }
        };

        Ok(BalanceMutation {
            kind,
            amount,
            balance_before: state.balance,
            balance_after: new_state.balance,
            new_state,
        })
    }

    /// Returns true if `balance_after` follows from `balance_before` for the kind.
    #[must_use]
    pub fn is_consistent_record(
        kind: CreditTransactionType,
        amount: Decimal,
        balance_before: Decimal,
        balance_after: Decimal,
    ) -> bool {
        let expected = if kind.is_credit() {
            balance_before.checked_add(amount)
        } else {
            balance_before.checked_sub(amount)
        };
        expected == Some(balance_after)
    }
}

/// Adds two storable values, `None` if the sum overflows or passes `MAX_AMOUNT`.
fn bounded_add(current: Decimal, amount: Decimal) -> Option<Decimal> {
    current.checked_add(amount).filter(|sum| *sum <= MAX_AMOUNT)
}
