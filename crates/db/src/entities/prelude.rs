//! Entity re-exports.

pub use super::companies::Entity as Companies;
pub use super::company_credits::Entity as CompanyCredits;
pub use super::credit_transactions::Entity as CreditTransactions;
pub use super::services::Entity as Services;
pub use super::users::Entity as Users;
