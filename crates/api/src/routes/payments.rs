//! Generic payment routes: client collections and provider payments.

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
use obra_db::entities::sea_orm_active_enums::CounterpartyType;
use obra_db::repositories::CreatePaymentInput;
use obra_db::{AutoAccountingService, PaymentRepository};

/// Creates the payments router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/payments", post(create_payment))
        .route("/organizations/{org_id}/payments", get(list_payments))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
struct CreatePaymentRequest {
    counterparty_type: CounterpartyType,
    counterparty_name: String,
    rubro: Option<String>,
    amount: Decimal,
    paid_on: NaiveDate,
}

/// POST /organizations/{org_id}/payments - Record a payment, then post it.
async fn create_payment(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    let payment = match PaymentRepository::new((*state.db).clone())
        .create_payment(CreatePaymentInput {
            organization_id: org_id,
            counterparty_type: payload.counterparty_type,
            counterparty_name: payload.counterparty_name,
            rubro: payload.rubro,
            amount: payload.amount,
            paid_on: payload.paid_on,
        })
        .await
    {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to record payment");
            return internal_error();
        }
    };

    let outcome = AutoAccountingService::new((*state.db).clone())
        .create_payment_entry(payment.id)
        .await;
    let entry_number = report_accounting("PAYMENT", outcome);

    (
        StatusCode::CREATED,
        Json(json!({
            "payment": payment,
            "entry_number": entry_number
        })),
    )
        .into_response()
}

/// GET /organizations/{org_id}/payments - List payments.
async fn list_payments(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    match PaymentRepository::new((*state.db).clone()).list(org_id).await {
        Ok(payments) => Json(json!({ "payments": payments })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list payments");
            internal_error()
        }
    }
}
