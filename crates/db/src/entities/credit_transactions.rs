//! `SeaORM` Entity for credit_transactions table.
//!
//! Rows are append-only; the database rejects UPDATE.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::CreditTransactionType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_credit_id: Uuid,
    #[sea_orm(column_name = "type")]
    pub transaction_type: CreditTransactionType,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub balance_before: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub balance_after: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company_credits::Entity",
        from = "Column::CompanyCreditId",
        to = "super::company_credits::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CompanyCredits,
}

impl Related<super::company_credits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyCredits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
