//! Promotion request and plan types.

use rust_decimal::Decimal;

/// Fee charged when a service goes from not promoted to promoted.
pub const PROMOTION_COST: Decimal = Decimal::TEN;

/// What the owner asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionRequest {
    /// Flip the current flag.
    Toggle,
    /// Set the flag to an explicit value.
    Set(bool),
}

impl PromotionRequest {
    /// Returns the flag value this request leads to from `current`.
    #[must_use]
    pub const fn desired(self, current: bool) -> bool {
        match self {
            Self::Toggle => !current,
            Self::Set(value) => value,
        }
    }
}

/// Outcome of planning a promotion request against the current flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionPlan {
    /// Flag already has the desired value; nothing to do.
    Unchanged,
    /// Set the flag and charge `cost` to the company account.
    Promote {
        /// Credits to debit.
        cost: Decimal,
    },
    /// Clear the flag; no ledger interaction.
    Demote,
}

impl PromotionPlan {
    /// Returns the flag value after this plan is carried out.
    #[must_use]
    pub const fn resulting_flag(self, current: bool) -> bool {
        match self {
            Self::Unchanged => current,
            Self::Promote { .. } => true,
            Self::Demote => false,
        }
    }

    /// Returns the credits this plan charges.
    #[must_use]
    pub const fn cost(self) -> Decimal {
        match self {
            Self::Promote { cost } => cost,
            Self::Unchanged | Self::Demote => Decimal::ZERO,
        }
    }
}
