//! Property-based tests for `CreditService`.
//!
//! - Balance never goes negative for any earn/spend sequence
//! - `balance == 100 + total_earned - total_spent` after every step
//! - Every mutation's snapshots chain into the next one
//! - No input makes `apply` panic or store a value above `MAX_AMOUNT`

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::CreditError;
use super::service::CreditService;
use super::types::{AccountBalance, CreditTransactionType, MAX_AMOUNT};

/// Strategy to generate positive amounts (0.0001 to 500.0000).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..5_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Strategy to generate any non-negative decimal, up to `Decimal::MAX`.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
}

/// Strategy to generate storable column values (0 to `MAX_AMOUNT`).
fn storable_value() -> impl Strategy<Value = Decimal> {
    (0i128..=9_999_999_999_999_999_999i128).prop_map(|units| Decimal::from_i128_with_scale(units, 4))
}

/// Strategy to generate any transaction kind.
fn kind_strategy() -> impl Strategy<Value = CreditTransactionType> {
    prop_oneof![
        Just(CreditTransactionType::Earn),
        Just(CreditTransactionType::Spend),
        Just(CreditTransactionType::Bonus),
        Just(CreditTransactionType::Deduction),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any sequence of requests keeps the account consistent, with rejected
    /// debits leaving the state untouched.
    #[test]
    fn prop_sequence_preserves_invariants(
        ops in prop::collection::vec((kind_strategy(), positive_amount()), 1..40),
    ) {
        let mut state = AccountBalance::initial();
        let mut last_after = state.balance;

        for (kind, amount) in ops {
            match CreditService::apply(state, kind, amount) {
                Ok(mutation) => {
                    prop_assert_eq!(mutation.balance_before, last_after);
                    prop_assert!(CreditService::is_consistent_record(
                        kind,
                        amount,
                        mutation.balance_before,
                        mutation.balance_after,
                    ));
                    prop_assert!(mutation.new_state.total_earned >= state.total_earned);
                    prop_assert!(mutation.new_state.total_spent >= state.total_spent);
                    state = mutation.new_state;
                    last_after = mutation.balance_after;
                }
                Err(CreditError::InsufficientCredits { available, required }) => {
                    prop_assert!(!kind.is_credit());
                    prop_assert_eq!(available, state.balance);
                    prop_assert!(required > available);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }

            prop_assert!(state.balance >= Decimal::ZERO);
            prop_assert!(state.is_consistent());
            prop_assert_eq!(state.balance, last_after);
        }
    }

    /// Credits always succeed and raise the balance by exactly the amount.
    #[test]
    fn prop_credit_always_succeeds(amount in positive_amount()) {
        let mutation = CreditService::apply(
            AccountBalance::initial(),
            CreditTransactionType::Earn,
            amount,
        );
        prop_assert!(mutation.is_ok());
        let mutation = mutation.unwrap();
        prop_assert_eq!(mutation.balance_after - mutation.balance_before, amount);
    }

    /// A debit succeeds iff the balance covers it.
    #[test]
    fn prop_debit_succeeds_iff_covered(
        balance in positive_amount(),
        amount in positive_amount(),
    ) {
        let state = AccountBalance {
            balance,
            total_earned: Decimal::ZERO,
            total_spent: Decimal::ONE_HUNDRED - balance,
        };
        let result = CreditService::apply(state, CreditTransactionType::Spend, amount);
        prop_assert_eq!(result.is_ok(), balance >= amount);
    }

    /// Amounts with more than four fractional digits are rejected.
    #[test]
    fn prop_excess_scale_rejected(units in 1i64..1_000_000i64) {
        let amount = Decimal::new(units * 10 + 1, 5);
        prop_assert_eq!(
            CreditService::validate_amount(amount),
            Err(CreditError::InvalidAmount(amount))
        );
    }

    /// Any amount against any storable state either fails cleanly or yields
    /// columns that still fit the store.
    #[test]
    fn prop_apply_never_exceeds_storable_max(
        balance in storable_value(),
        total_earned in storable_value(),
        total_spent in storable_value(),
        kind in kind_strategy(),
        amount in any_decimal(),
    ) {
        let state = AccountBalance { balance, total_earned, total_spent };

        match CreditService::apply(state, kind, amount) {
            Ok(mutation) => {
                prop_assert!(amount <= MAX_AMOUNT);
                prop_assert!(mutation.new_state.balance <= MAX_AMOUNT);
                prop_assert!(mutation.new_state.total_earned <= MAX_AMOUNT);
                prop_assert!(mutation.new_state.total_spent <= MAX_AMOUNT);
                prop_assert!(mutation.new_state.balance >= Decimal::ZERO);
            }
            Err(
                CreditError::InvalidAmount(_)
                | CreditError::InsufficientCredits { .. }
                | CreditError::BalanceLimitExceeded { .. },
            ) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Amounts above the storable maximum are rejected whatever their scale.
    #[test]
    fn prop_oversized_amount_rejected(amount in any_decimal()) {
        if amount > MAX_AMOUNT {
            prop_assert_eq!(
                CreditService::validate_amount(amount),
                Err(CreditError::InvalidAmount(amount))
            );
        }
    }
}
