//! `SeaORM` Entity for company_credits table.
//!
//! One ledger account per company. Balance columns are only written by
//! `CreditRepository`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use bizlink_core::credit::AccountBalance;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "company_credits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub company_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub balance: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_earned: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_spent: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Returns the balance columns as a core value.
    #[must_use]
    pub const fn account_balance(&self) -> AccountBalance {
        AccountBalance {
            balance: self.balance,
            total_earned: self.total_earned,
            total_spent: self.total_spent,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Companies,
    #[sea_orm(has_many = "super::credit_transactions::Entity")]
    CreditTransactions,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::credit_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
