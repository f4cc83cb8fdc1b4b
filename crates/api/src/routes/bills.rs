//! Bill routes: creation with rubro splits and full/partial payments.
//!
//! Both writes fire the accounting engine afterwards; a posting failure is
//! logged and reported as a missing `entry_number`, never as a failed bill.

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

use crate::routes::organizations::{internal_error, not_found};
use crate::routes::{error_response, report_accounting};
use obra_shared::AppError;
use crate::AppState;
use obra_db::entities::sea_orm_active_enums::BillType;
use obra_db::repositories::{BillError, CreateBillInput, RubroLine};
use obra_db::{AutoAccountingService, BillRepository};

/// Creates the bills router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/bills", post(create_bill))
        .route("/organizations/{org_id}/bills", get(list_bills))
        .route("/bills/{bill_id}/payments", post(pay_bill))
}

/// One rubro line in a bill request.
#[derive(Debug, Deserialize)]
struct RubroLineRequest {
    rubro: String,
    percentage: Decimal,
}

/// Request body for creating a bill.
#[derive(Debug, Deserialize)]
struct CreateBillRequest {
    bill_type: BillType,
    counterparty_name: String,
    total: Decimal,
    issued_on: NaiveDate,
    description: Option<String>,
    rubros: Vec<RubroLineRequest>,
}

/// Request body for paying a bill.
#[derive(Debug, Deserialize)]
struct PayBillRequest {
    amount: Decimal,
    paid_on: NaiveDate,
}

/// POST /organizations/{org_id}/bills - Create a bill, then post it.
async fn create_bill(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreateBillRequest>,
) -> impl IntoResponse {
    let created = BillRepository::new((*state.db).clone())
        .create_bill(CreateBillInput {
            organization_id: org_id,
            bill_type: payload.bill_type,
            counterparty_name: payload.counterparty_name,
            total: payload.total,
            issued_on: payload.issued_on,
            description: payload.description,
            rubros: payload
                .rubros
                .into_iter()
                .map(|line| RubroLine {
                    rubro: line.rubro,
                    percentage: line.percentage,
                })
                .collect(),
        })
        .await;

    let created = match created {
        Ok(c) => c,
        Err(e @ (BillError::NoRubros | BillError::PercentagesNotHundred(_))) => {
            return error_response(&AppError::BusinessRule(e.to_string()));
        }
        Err(e) => {
            error!(error = %e, "Failed to create bill");
            return internal_error();
        }
    };

    let outcome = AutoAccountingService::new((*state.db).clone())
        .create_bill_entry(created.bill.id)
        .await;
    let entry_number = report_accounting("BILL", outcome);

    (
        StatusCode::CREATED,
        Json(json!({
            "bill": created.bill,
            "rubros": created.rubros,
            "entry_number": entry_number
        })),
    )
        .into_response()
}

/// GET /organizations/{org_id}/bills - List a tenant's bills.
async fn list_bills(State(state): State<AppState>, Path(org_id): Path<Uuid>) -> impl IntoResponse {
    match BillRepository::new((*state.db).clone()).list(org_id).await {
        Ok(bills) => Json(json!({ "bills": bills })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list bills");
            internal_error()
        }
    }
}

/// POST /bills/{bill_id}/payments - Record a payment, then post it.
async fn pay_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<Uuid>,
    Json(payload): Json<PayBillRequest>,
) -> impl IntoResponse {
    let payment = match BillRepository::new((*state.db).clone())
        .record_payment(bill_id, payload.amount, payload.paid_on)
        .await
    {
        Ok(p) => p,
        Err(BillError::NotFound(_)) => return not_found("bill"),
        Err(e) => {
            error!(error = %e, "Failed to record bill payment");
            return internal_error();
        }
    };

    let outcome = AutoAccountingService::new((*state.db).clone())
        .create_bill_payment_entry(payment.id)
        .await;
    let entry_number = report_accounting("BILL_PAYMENT", outcome);

    (
        StatusCode::CREATED,
        Json(json!({
            "payment": payment,
            "entry_number": entry_number
        })),
    )
        .into_response()
}
