//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories for the credit ledger, catalog lookups and promotion settlement
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    CatalogError, CatalogRepository, CreditRepository, CreditRepositoryError, PromotionRepository,
    PromotionRepositoryError,
};

use std::time::Duration;

use bizlink_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

/// Longest pause between two connection attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Establishes a pooled connection to the database.
///
/// Retries up to `connect_attempts` times, doubling the pause after each
/// failure.
///
/// # Errors
///
/// Returns the last connection error once all attempts are used up.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let attempts = config.connect_attempts.max(1);
    let mut backoff = Duration::from_millis(500);
    let mut attempt = 1;

    loop {
        match Database::connect(options.clone()).await {
            Ok(db) => {
                info!(attempt, "Connected to database");
                return Ok(db);
            }
            Err(e) if attempt < attempts => {
                warn!(
                    attempt,
                    max_attempts = attempts,
                    retry_in_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
