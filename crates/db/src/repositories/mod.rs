//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod catalog;
pub mod credit;
pub mod promotion;

pub use catalog::{CatalogError, CatalogRepository, CreateServiceInput};
pub use credit::{CreditRepository, CreditRepositoryError};
pub use promotion::{PromotionRepository, PromotionRepositoryError};
