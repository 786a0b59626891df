//! Maps domain and repository errors to HTTP responses.
//!
//! Every failure body has the shape `{"error": <code>, "message": <text>}`.
//! Store faults are logged here and reach the client only as a generic
//! `DATABASE_ERROR`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bizlink_core::credit::CreditError;
use bizlink_core::promotion::PromotionError;
use bizlink_db::{CatalogError, CreditRepositoryError, PromotionRepositoryError};
use bizlink_shared::AppError;
use sea_orm::DbErr;
use serde_json::json;
use tracing::{error, warn};

/// Builds an error response.
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": error,
            "message": message.into()
        })),
    )
        .into_response()
}

/// Builds the response for an application-wide error.
pub fn app_error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, err.error_code(), err.public_message())
}

/// Logs a store fault and hides its details from the client.
pub fn database_error(err: &DbErr, context: &str) -> Response {
    error!(error = %err, context, "Database error");
    app_error_response(&AppError::Database(err.to_string()))
}

/// Maps a credit rule violation.
pub fn credit_error(err: &CreditError) -> Response {
    if matches!(
        err,
        CreditError::InsufficientCredits { .. } | CreditError::BalanceLimitExceeded { .. }
    ) {
        warn!(error = %err, "Credit operation rejected");
    }
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    error_response(status, err.error_code(), err.to_string())
}

/// Maps a credit repository error.
pub fn credit_repository_error(err: &CreditRepositoryError, context: &str) -> Response {
    match err {
        CreditRepositoryError::Credit(e) => credit_error(e),
        CreditRepositoryError::Database(e) => database_error(e, context),
    }
}

/// Maps a promotion repository error.
pub fn promotion_repository_error(err: &PromotionRepositoryError) -> Response {
    match err {
        PromotionRepositoryError::Promotion(PromotionError::Credit(e)) => credit_error(e),
        PromotionRepositoryError::Promotion(e) => {
            let status =
                StatusCode::from_u16(e.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST);
            error_response(status, e.error_code(), e.to_string())
        }
        PromotionRepositoryError::Database(e) => database_error(e, "set_promotion"),
    }
}

/// Maps a company ownership check failure.
pub fn catalog_error(err: &CatalogError) -> Response {
    match err {
        CatalogError::CompanyNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "COMPANY_NOT_FOUND", err.to_string())
        }
        CatalogError::NotOwner { .. } => app_error_response(&AppError::Forbidden(
            "You do not own this company".to_string(),
        )),
        CatalogError::Database(e) => database_error(e, "check_company_owner"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizlink_core::credit::CreditOperation;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use uuid::Uuid;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_insufficient_credits_is_bad_request() {
        let response = credit_error(&CreditError::InsufficientCredits {
            available: dec!(5),
            required: dec!(10),
        });

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "INSUFFICIENT_CREDITS");
    }

    #[tokio::test]
    async fn test_invalid_type_message() {
        let response = credit_error(&CreditError::InvalidTransactionType {
            operation: CreditOperation::Earn,
            kind: "spend".to_string(),
        });

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_TRANSACTION_TYPE");
        assert_eq!(
            body["message"],
            "Invalid transaction type for earning credits: spend"
        );
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = database_error(&DbErr::Custom("password=hunter2".to_string()), "test");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An error occurred");
    }

    #[tokio::test]
    async fn test_not_owner_is_forbidden() {
        let service_id = Uuid::new_v4();
        let response = promotion_repository_error(&PromotionRepositoryError::Promotion(
            PromotionError::NotOwner { service_id },
        ));

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "FORBIDDEN");

        let response = catalog_error(&CatalogError::NotOwner {
            company_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        });
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_missing_company_is_not_found() {
        let response = catalog_error(&CatalogError::CompanyNotFound(Uuid::new_v4()));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "COMPANY_NOT_FOUND");
    }
}
