//! Company credit routes.
//!
//! Every endpoint requires the caller to own the company.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState,
    error::{catalog_error, credit_repository_error},
    extract::{ApiJson, ApiPath},
    middleware::AuthUser,
};
use bizlink_core::credit::{BalanceSummary, CreditTransactionType, INITIAL_BALANCE};
use bizlink_db::{
    CatalogRepository, CreditRepository,
    entities::{company_credits, credit_transactions},
};

/// Creates the credit routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/credits/company/{company_id}", get(get_company_credits))
        .route(
            "/credits/company/{company_id}/transactions",
            get(list_transactions),
        )
        .route("/credits/company/{company_id}/earn", post(earn_credits))
        .route("/credits/company/{company_id}/spend", post(spend_credits))
        .route("/credits/company/{company_id}/balance", get(get_balance))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for earning or spending credits.
#[derive(Debug, Deserialize)]
pub struct CreditTransactionRequest {
    /// Transaction kind: `earn`/`bonus` for earning, `spend`/`deduction` for spending.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount, strictly positive.
    pub amount: Decimal,
    /// Optional description stored with the audit record.
    pub description: Option<String>,
}

/// Response for a company credit account.
#[derive(Debug, Serialize)]
pub struct CompanyCreditResponse {
    /// Account ID.
    pub id: Uuid,
    /// Company ID.
    pub company_id: Uuid,
    /// Current balance.
    pub balance: String,
    /// Lifetime credits added.
    pub total_earned: String,
    /// Lifetime credits removed.
    pub total_spent: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last mutation timestamp.
    pub updated_at: String,
}

impl From<company_credits::Model> for CompanyCreditResponse {
    fn from(account: company_credits::Model) -> Self {
        Self {
            id: account.id,
            company_id: account.company_id,
            balance: account.balance.to_string(),
            total_earned: account.total_earned.to_string(),
            total_spent: account.total_spent.to_string(),
            created_at: account.created_at.to_rfc3339(),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}

/// Response for a credit transaction.
#[derive(Debug, Serialize)]
pub struct CreditTransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Account ID.
    pub company_credit_id: Uuid,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: CreditTransactionType,
    /// Amount.
    pub amount: String,
    /// Description.
    pub description: Option<String>,
    /// Balance before the transaction.
    pub balance_before: String,
    /// Balance after the transaction.
    pub balance_after: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<credit_transactions::Model> for CreditTransactionResponse {
    fn from(tx: credit_transactions::Model) -> Self {
        Self {
            id: tx.id,
            company_credit_id: tx.company_credit_id,
            kind: tx.transaction_type.into(),
            amount: tx.amount.to_string(),
            description: tx.description,
            balance_before: tx.balance_before.to_string(),
            balance_after: tx.balance_after.to_string(),
            created_at: tx.created_at.to_rfc3339(),
        }
    }
}

/// Response for a balance summary.
#[derive(Debug, Serialize)]
pub struct BalanceSummaryResponse {
    /// Company ID.
    pub company_id: Uuid,
    /// Current balance.
    pub balance: String,
    /// Lifetime credits added.
    pub total_earned: String,
    /// Lifetime credits removed.
    pub total_spent: String,
    /// Last mutation timestamp, null if no account exists yet.
    pub last_updated: Option<String>,
    /// Set only when no account exists yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BalanceSummaryResponse {
    /// Builds the response for a company's summary.
    #[must_use]
    pub fn new(company_id: Uuid, summary: BalanceSummary) -> Self {
        let message = (!summary.is_persisted())
            .then(|| format!("Initial credit balance: {INITIAL_BALANCE} MT"));
        Self {
            company_id,
            balance: summary.balance.to_string(),
            total_earned: summary.total_earned.to_string(),
            total_spent: summary.total_spent.to_string(),
            last_updated: summary.last_updated.map(|t| t.to_rfc3339()),
            message,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /credits/company/{company_id} - Get the account, creating it if absent.
async fn get_company_credits(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_company_owner(&state, company_id, auth.user_id()).await {
        return response;
    }

    let repo = CreditRepository::new((*state.db).clone());

    match repo.get_or_create_account(company_id).await {
        Ok(account) => {
            (StatusCode::OK, Json(CompanyCreditResponse::from(account))).into_response()
        }
        Err(e) => credit_repository_error(&e, "get_or_create_account"),
    }
}

/// GET /credits/company/{company_id}/transactions - List transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_company_owner(&state, company_id, auth.user_id()).await {
        return response;
    }

    let repo = CreditRepository::new((*state.db).clone());

    match repo.list_transactions(company_id).await {
        Ok(transactions) => {
            let response: Vec<CreditTransactionResponse> = transactions
                .into_iter()
                .map(CreditTransactionResponse::from)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => credit_repository_error(&e, "list_transactions"),
    }
}

/// POST /credits/company/{company_id}/earn - Add credits.
async fn earn_credits(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreditTransactionRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_company_owner(&state, company_id, auth.user_id()).await {
        return response;
    }

    let repo = CreditRepository::new((*state.db).clone());

    match repo
        .earn(company_id, &request.kind, request.amount, request.description)
        .await
    {
        Ok(account) => {
            (StatusCode::OK, Json(CompanyCreditResponse::from(account))).into_response()
        }
        Err(e) => credit_repository_error(&e, "earn"),
    }
}

/// POST /credits/company/{company_id}/spend - Remove credits.
async fn spend_credits(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreditTransactionRequest>,
) -> impl IntoResponse {
    if let Err(response) = check_company_owner(&state, company_id, auth.user_id()).await {
        return response;
    }

    let repo = CreditRepository::new((*state.db).clone());

    match repo
        .spend(company_id, &request.kind, request.amount, request.description)
        .await
    {
        Ok(account) => {
            (StatusCode::OK, Json(CompanyCreditResponse::from(account))).into_response()
        }
        Err(e) => credit_repository_error(&e, "spend"),
    }
}

/// GET /credits/company/{company_id}/balance - Read-only summary.
async fn get_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(company_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    if let Err(response) = check_company_owner(&state, company_id, auth.user_id()).await {
        return response;
    }

    let repo = CreditRepository::new((*state.db).clone());

    match repo.get_balance_summary(company_id).await {
        Ok(summary) => {
            (
                StatusCode::OK,
                Json(BalanceSummaryResponse::new(company_id, summary)),
            )
                .into_response()
        }
        Err(e) => credit_repository_error(&e, "get_balance_summary"),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Checks that the company exists and belongs to the caller.
async fn check_company_owner(
    state: &AppState,
    company_id: Uuid,
    user_id: Uuid,
) -> Result<(), axum::response::Response> {
    let catalog = CatalogRepository::new((*state.db).clone());

    catalog
        .require_owned_company(company_id, user_id)
        .await
        .map(|_| ())
        .map_err(|e| catalog_error(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_without_account_has_message() {
        let company_id = Uuid::new_v4();
        let response = BalanceSummaryResponse::new(company_id, BalanceSummary::not_yet_created());

        assert_eq!(response.company_id, company_id);
        assert_eq!(response.balance, "100");
        assert_eq!(response.total_earned, "0");
        assert!(response.last_updated.is_none());
        assert_eq!(
            response.message.as_deref(),
            Some("Initial credit balance: 100 MT")
        );
    }

    #[test]
    fn test_summary_with_account_has_no_message() {
        let summary = BalanceSummary {
            balance: dec!(150.0000),
            total_earned: dec!(50.0000),
            total_spent: dec!(0.0000),
            last_updated: Some(Utc::now()),
        };

        let company_id = Uuid::new_v4();
        let json =
            serde_json::to_value(BalanceSummaryResponse::new(company_id, summary)).unwrap();

        assert_eq!(json["company_id"], company_id.to_string());
        assert_eq!(json["balance"], "150.0000");
        assert!(json["last_updated"].is_string());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_request_reads_type_field() {
        let request: CreditTransactionRequest =
            serde_json::from_str(r#"{"type": "bonus", "amount": "50", "description": "Welcome"}"#)
                .unwrap();

        assert_eq!(request.kind, "bonus");
        assert_eq!(request.amount, dec!(50));
        assert_eq!(request.description.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_request_accepts_numeric_amount() {
        let request: CreditTransactionRequest =
            serde_json::from_str(r#"{"type": "spend", "amount": 10.5}"#).unwrap();

        assert_eq!(request.amount, dec!(10.5));
        assert!(request.description.is_none());
    }
}
