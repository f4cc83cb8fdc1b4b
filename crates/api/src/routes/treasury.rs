//! Treasury routes: cash income/expense movements.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::routes::organizations::internal_error;
use crate::routes::report_accounting;
use crate::AppState;
use obra_db::entities::sea_orm_active_enums::CashTransactionType;
use obra_db::repositories::CreateTransactionInput;
use obra_db::{AutoAccountingService, TreasuryRepository};

/// Creates the treasury router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/transactions", post(create_transaction))
        .route("/organizations/{org_id}/transactions", get(list_transactions))
}

/// Request body for recording a cash movement.
#[derive(Debug, Deserialize)]
struct CreateTransactionRequest {
    transaction_type: CashTransactionType,
    amount: Decimal,
    occurred_on: NaiveDate,
    description: Option<String>,
}

/// POST /organizations/{org_id}/transactions - Record a movement, then post it.
async fn create_transaction(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let tx = match TreasuryRepository::new((*state.db).clone())
        .create_transaction(CreateTransactionInput {
            organization_id: org_id,
            transaction_type: payload.transaction_type,
            amount: payload.amount,
            occurred_on: payload.occurred_on,
            description: payload.description,
        })
        .await
    {
        Ok(tx) => tx,
        Err(e) => {
            error!(error = %e, "Failed to record cash transaction");
            return internal_error();
        }
    };

    let outcome = AutoAccountingService::new((*state.db).clone())
        .create_transaction_entry(tx.id)
        .await;
    let entry_number = report_accounting("TRANSACTION", outcome);

    (
        StatusCode::CREATED,
        Json(json!({
            "transaction": tx,
            "entry_number": entry_number
        })),
    )
        .into_response()
}

/// GET /organizations/{org_id}/transactions - List cash movements.
async fn list_transactions(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    match TreasuryRepository::new((*state.db).clone()).list(org_id).await {
        Ok(transactions) => Json(json!({ "transactions": transactions })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list cash transactions");
            internal_error()
        }
    }
}
