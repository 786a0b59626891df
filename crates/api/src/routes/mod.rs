//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod credits;
pub mod health;
pub mod services;

/// Creates the API router with public routes and the protected routes that
/// need state for the auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(credits::routes())
        .merge(services::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
