//! Service promotion routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::patch,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    AppState,
    error::promotion_repository_error,
    extract::ApiPath,
    middleware::AuthUser,
};
use bizlink_core::promotion::PromotionRequest;
use bizlink_db::{PromotionRepository, entities::services};

/// Creates the service routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services/{service_id}/promote", patch(toggle_promotion))
        .route(
            "/services/{service_id}/promote/{promoted}",
            patch(set_promotion),
        )
}

/// Response for a service.
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    /// Service ID.
    pub id: Uuid,
    /// Owning company ID.
    pub company_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Price.
    pub price: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Publication status.
    pub status: String,
    /// Whether the service is promoted.
    pub is_promoted: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<services::Model> for ServiceResponse {
    fn from(service: services::Model) -> Self {
        Self {
            id: service.id,
            company_id: service.company_id,
            title: service.title,
            description: service.description,
            price: service.price.map(|p| p.to_string()),
            category: service.category,
            status: service.status,
            is_promoted: service.is_promoted,
            created_at: service.created_at.to_rfc3339(),
            updated_at: service.updated_at.to_rfc3339(),
        }
    }
}

/// PATCH /services/{service_id}/promote - Flip the promotion flag.
async fn toggle_promotion(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(service_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    apply(&state, service_id, auth.user_id(), PromotionRequest::Toggle).await
}

/// PATCH /services/{service_id}/promote/{promoted} - Set the promotion flag.
async fn set_promotion(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((service_id, promoted)): ApiPath<(Uuid, bool)>,
) -> impl IntoResponse {
    apply(
        &state,
        service_id,
        auth.user_id(),
        PromotionRequest::Set(promoted),
    )
    .await
}

async fn apply(
    state: &AppState,
    service_id: Uuid,
    user_id: Uuid,
    request: PromotionRequest,
) -> axum::response::Response {
    let repo = PromotionRepository::new((*state.db).clone());

    match repo.set_promotion(service_id, user_id, request).await {
        Ok(service) => (StatusCode::OK, Json(ServiceResponse::from(service))).into_response(),
        Err(e) => promotion_repository_error(&e),
    }
}
