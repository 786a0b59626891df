//! Catalog repository: users, companies and services.
//!
//! The ledger only needs read access to the catalog plus a few inserts used
//! by the seeder and the integration tests.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{companies, services, users};

/// Error types for catalog ownership checks.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Company does not exist.
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    /// Caller does not own the company.
    #[error("User {user_id} does not own company {company_id}")]
    NotOwner {
        /// The company.
        company_id: Uuid,
        /// The caller.
        user_id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a service.
#[derive(Debug, Clone)]
pub struct CreateServiceInput {
    /// Owning company.
    pub company_id: Uuid,
    /// Service title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional price.
    pub price: Option<Decimal>,
    /// Optional category.
    pub category: Option<String>,
}

/// Catalog repository for company and service lookups.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_company(&self, id: Uuid) -> Result<Option<companies::Model>, DbErr> {
        companies::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a service by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_service(&self, id: Uuid) -> Result<Option<services::Model>, DbErr> {
        services::Entity::find_by_id(id).one(&self.db).await
    }

    /// Resolves a company and checks that `user_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CompanyNotFound`, `CatalogError::NotOwner`, or
    /// a database error.
    pub async fn require_owned_company(
        &self,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<companies::Model, CatalogError> {
        let company = self
            .find_company(company_id)
            .await?
            .ok_or(CatalogError::CompanyNotFound(company_id))?;

        if company.owner_id != user_id {
            return Err(CatalogError::NotOwner {
                company_id,
                user_id,
            });
        }

        Ok(company)
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_user(
        &self,
        email: &str,
        full_name: Option<&str>,
        password_hash: &str,
    ) -> Result<users::Model, DbErr> {
        let now = Utc::now().into();

        users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            full_name: Set(full_name.map(ToString::to_string)),
            password_hash: Set(password_hash.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Creates a company owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_company(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<companies::Model, DbErr> {
        let now = Utc::now().into();

        companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.map(ToString::to_string)),
            owner_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Creates a service, not promoted, with status `active`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_service(
        &self,
        input: CreateServiceInput,
    ) -> Result<services::Model, DbErr> {
        let now = Utc::now().into();

        services::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            category: Set(input.category),
            status: Set("active".to_string()),
            is_promoted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }
}
