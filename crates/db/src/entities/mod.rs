//! `SeaORM` entity definitions.

pub mod prelude;

pub mod companies;
pub mod company_credits;
pub mod credit_transactions;
pub mod sea_orm_active_enums;
pub mod services;
pub mod users;
