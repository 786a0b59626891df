//! Company credit ledger.
//!
//! This module implements the rules behind the per-company credit account:
//! - Transaction kinds and which operation accepts them
//! - Amount validation
//! - Balance mutation arithmetic with before/after snapshots
//! - The default summary shown before an account exists
//! - Error types for credit operations

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::CreditError;
pub use service::CreditService;
pub use types::{
    AMOUNT_SCALE, AccountBalance, BalanceMutation, BalanceSummary, CreditOperation,
    CreditTransactionType, INITIAL_BALANCE, MAX_AMOUNT,
};
