//! Credit ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::CreditError;

/// Balance every new ledger account starts with.
pub const INITIAL_BALANCE: Decimal = Decimal::ONE_HUNDRED;

/// Fractional digits the store keeps for amounts and balances (NUMERIC(19, 4)).
pub const AMOUNT_SCALE: u32 = 4;

/// Largest amount or balance the store can hold: `999999999999999.9999`.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(0x89E7_FFFF, 0x8AC7_2304, 0, false, AMOUNT_SCALE);

/// Kind of a credit transaction.
///
/// The sign of a transaction is implied by its kind: `Earn` and `Bonus` add
/// to the balance, `Spend` and `Deduction` subtract from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditTransactionType {
    /// Credits earned through normal activity.
    Earn,
    /// Credits spent on a paid feature.
    Spend,
    /// Credits granted as a bonus.
    Bonus,
    /// Credits removed by an adjustment.
    Deduction,
}

impl CreditTransactionType {
    /// Returns the lowercase wire/storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Earn => "earn",
            Self::Spend => "spend",
            Self::Bonus => "bonus",
            Self::Deduction => "deduction",
        }
    }

    /// Returns true if this kind increases the balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Earn | Self::Bonus)
    }

    /// Returns the operation that accepts this kind.
    #[must_use]
    pub const fn operation(self) -> CreditOperation {
        if self.is_credit() {
            CreditOperation::Earn
        } else {
            CreditOperation::Spend
        }
    }
}

impl std::fmt::Display for CreditTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CreditTransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earn" => Ok(Self::Earn),
            "spend" => Ok(Self::Spend),
            "bonus" => Ok(Self::Bonus),
            "deduction" => Ok(Self::Deduction),
            _ => Err(format!("Unknown credit transaction type: {s}")),
        }
    }
}

/// Balance-changing operation exposed by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOperation {
    /// Adds credits (`earn`, `bonus`).
    Earn,
    /// Removes credits (`spend`, `deduction`).
    Spend,
}

impl CreditOperation {
    /// Returns true if this operation accepts the given transaction kind.
    #[must_use]
    pub const fn accepts(self, kind: CreditTransactionType) -> bool {
        matches!(
            (self, kind.operation()),
            (Self::Earn, Self::Earn) | (Self::Spend, Self::Spend)
        )
    }

    /// Parses a raw transaction kind for this operation.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::InvalidTransactionType` if the kind is unknown
    /// or belongs to the other operation.
    pub fn parse_kind(self, raw: &str) -> Result<CreditTransactionType, CreditError> {
        raw.parse::<CreditTransactionType>()
            .ok()
            .filter(|kind| self.accepts(*kind))
            .ok_or_else(|| CreditError::InvalidTransactionType {
                operation: self,
                kind: raw.to_string(),
            })
    }
}

impl std::fmt::Display for CreditOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Earn => f.write_str("earning"),
            Self::Spend => f.write_str("spending"),
        }
    }
}

/// Balance columns of a ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountBalance {
    /// Current spendable balance.
    pub balance: Decimal,
    /// Lifetime credits added.
    pub total_earned: Decimal,
    /// Lifetime credits removed.
    pub total_spent: Decimal,
}

impl AccountBalance {
    /// Returns the balance of a freshly created account.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            balance: INITIAL_BALANCE,
            total_earned: Decimal::ZERO,
            total_spent: Decimal::ZERO,
        }
    }

    /// Returns true if the ledger invariants hold:
    /// non-negative balance and totals, and
    /// `balance == INITIAL_BALANCE + total_earned - total_spent`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.balance >= Decimal::ZERO
            && self.total_earned >= Decimal::ZERO
            && self.total_spent >= Decimal::ZERO
            && self.balance == INITIAL_BALANCE + self.total_earned - self.total_spent
    }
}

impl Default for AccountBalance {
    fn default() -> Self {
        Self::initial()
    }
}

/// Result of applying one transaction to an account.
///
/// Carries everything needed to update the account row and append the audit
/// record in the same unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceMutation {
    /// Transaction kind.
    pub kind: CreditTransactionType,
    /// Strictly positive magnitude of the change.
    pub amount: Decimal,
    /// Balance immediately before the transaction.
    pub balance_before: Decimal,
    /// Balance immediately after the transaction.
    pub balance_after: Decimal,
    /// Account columns after the transaction.
    pub new_state: AccountBalance,
}

/// Read-only projection of an account's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    /// Current spendable balance.
    pub balance: Decimal,
    /// Lifetime credits added.
    pub total_earned: Decimal,
    /// Lifetime credits removed.
    pub total_spent: Decimal,
    /// Last mutation time, `None` if no account exists yet.
    pub last_updated: Option<DateTime<Utc>>,
}

impl BalanceSummary {
    /// Summary of an account that has not been created yet.
    #[must_use]
    pub const fn not_yet_created() -> Self {
        Self {
            balance: INITIAL_BALANCE,
            total_earned: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            last_updated: None,
        }
    }

    /// Summary of a persisted account.
    #[must_use]
    pub const fn from_account(state: AccountBalance, last_updated: DateTime<Utc>) -> Self {
        Self {
            balance: state.balance,
            total_earned: state.total_earned,
            total_spent: state.total_spent,
            last_updated: Some(last_updated),
        }
    }

    /// Returns true if this summary describes an account that exists.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.last_updated.is_some()
    }
}
