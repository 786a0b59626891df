//! `SeaORM` active enums mapped to PostgreSQL enum types.

use bizlink_core::credit::CreditTransactionType as CoreTransactionType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "credit_transaction_type")]
#[serde(rename_all = "lowercase")]
pub enum CreditTransactionType {
    #[sea_orm(string_value = "earn")]
    Earn,
    #[sea_orm(string_value = "spend")]
    Spend,
    #[sea_orm(string_value = "bonus")]
    Bonus,
    #[sea_orm(string_value = "deduction")]
    Deduction,
}

impl From<CoreTransactionType> for CreditTransactionType {
    fn from(kind: CoreTransactionType) -> Self {
        match kind {
            CoreTransactionType::Earn => Self::Earn,
            CoreTransactionType::Spend => Self::Spend,
            CoreTransactionType::Bonus => Self::Bonus,
            CoreTransactionType::Deduction => Self::Deduction,
        }
    }
}

impl From<CreditTransactionType> for CoreTransactionType {
    fn from(kind: CreditTransactionType) -> Self {
        match kind {
            CreditTransactionType::Earn => Self::Earn,
            CreditTransactionType::Spend => Self::Spend,
            CreditTransactionType::Bonus => Self::Bonus,
            CreditTransactionType::Deduction => Self::Deduction,
        }
    }
}
