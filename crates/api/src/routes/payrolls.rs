//! Payroll routes: recording payroll runs.

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
use obra_db::repositories::CreatePayrollInput;
use obra_db::{AutoAccountingService, PayrollRepository};

/// Creates the payrolls router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/payrolls", post(create_payroll))
        .route("/organizations/{org_id}/payrolls", get(list_payrolls))
}

/// Request body for recording a payroll run.
#[derive(Debug, Deserialize)]
struct CreatePayrollRequest {
    period: String,
    base: Decimal,
    #[serde(default)]
    overtime: Decimal,
    #[serde(default)]
    bonuses: Decimal,
    #[serde(default)]
    deductions: Decimal,
    net_pay: Option<Decimal>,
    run_on: NaiveDate,
}

/// POST /organizations/{org_id}/payrolls - Record a run, then post it.
async fn create_payroll(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CreatePayrollRequest>,
) -> impl IntoResponse {
    let payroll = match PayrollRepository::new((*state.db).clone())
        .create_payroll(CreatePayrollInput {
            organization_id: org_id,
            period: payload.period,
            base: payload.base,
            overtime: payload.overtime,
            bonuses: payload.bonuses,
            deductions: payload.deductions,
            net_pay: payload.net_pay,
            run_on: payload.run_on,
        })
        .await
    {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to record payroll");
            return internal_error();
        }
    };

    let outcome = AutoAccountingService::new((*state.db).clone())
        .create_payroll_entry(payroll.id)
        .await;
    let entry_number = report_accounting("PAYROLL", outcome);

    (
        StatusCode::CREATED,
        Json(json!({
            "payroll": payroll,
            "entry_number": entry_number
        })),
    )
        .into_response()
}

/// GET /organizations/{org_id}/payrolls - List payroll runs.
async fn list_payrolls(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    match PayrollRepository::new((*state.db).clone()).list(org_id).await {
        Ok(payrolls) => Json(json!({ "payrolls": payrolls })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list payrolls");
            internal_error()
        }
    }
}
