//! Property-based tests for `PromotionService`.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::PromotionService;
use super::types::{PROMOTION_COST, PromotionPlan, PromotionRequest};
use crate::credit::{AccountBalance, CreditError, CreditService, CreditTransactionType};

fn request_strategy() -> impl Strategy<Value = PromotionRequest> {
    prop_oneof![
        Just(PromotionRequest::Toggle),
        any::<bool>().prop_map(PromotionRequest::Set),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The plan always lands on the flag the request asked for.
    #[test]
    fn prop_plan_reaches_desired_flag(
        current in any::<bool>(),
        request in request_strategy(),
    ) {
        let plan = PromotionService::plan(current, request);
        prop_assert_eq!(plan.resulting_flag(current), request.desired(current));
    }

    /// Only a false to true transition costs anything.
    #[test]
    fn prop_only_promotion_charges(
        current in any::<bool>(),
        request in request_strategy(),
    ) {
        let plan = PromotionService::plan(current, request);
        let charged = !current && request.desired(current);
        prop_assert_eq!(plan.cost() == PROMOTION_COST, charged);
        prop_assert_eq!(plan.cost() == Decimal::ZERO, !charged);
    }

    /// Settling a promotion succeeds iff the balance covers the fee.
    #[test]
    fn prop_fee_settles_iff_covered(cents in 0i64..5_000i64) {
        let balance = Decimal::new(cents, 2);
        let state = AccountBalance {
            balance,
            total_earned: Decimal::ZERO,
            total_spent: Decimal::ONE_HUNDRED - balance,
        };
        let PromotionPlan::Promote { cost } = PromotionService::plan(false, PromotionRequest::Toggle) else {
            return Err(TestCaseError::fail("toggle from false must promote"));
        };

        match CreditService::apply(state, CreditTransactionType::Spend, cost) {
            Ok(mutation) => {
                prop_assert!(balance >= PROMOTION_COST);
                prop_assert_eq!(mutation.balance_after, balance - PROMOTION_COST);
            }
            Err(CreditError::InsufficientCredits { .. }) => {
                prop_assert!(balance < PROMOTION_COST);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
