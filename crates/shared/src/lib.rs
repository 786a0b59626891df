//! Shared errors, configuration, and token handling for BizLink.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Layered configuration loading
//! - JWT claims and token validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::Claims;
pub use config::{AppConfig, LogFormat};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
