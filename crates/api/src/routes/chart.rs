//! Chart of accounts routes: provisioning, stats, listing, and per-tenant
//! category mapping overrides.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::error_response;
use crate::routes::organizations::{internal_error, not_found};
use crate::AppState;
use obra_db::{AccountResolver, ChartRepository};
use obra_shared::AppError;

/// Creates the chart router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/chart", post(setup_chart))
        .route("/organizations/{org_id}/chart/stats", get(chart_stats))
        .route("/organizations/{org_id}/chart/accounts", get(list_accounts))
        .route(
            "/organizations/{org_id}/chart/mappings",
            put(set_category_mapping),
        )
}

/// Request body for a category mapping override.
#[derive(Debug, Deserialize)]
struct CategoryMappingRequest {
    rubro: String,
    income_code: String,
    expense_code: String,
}

/// POST /organizations/{org_id}/chart - Provision the standard chart, gated
/// so a second call is a conflict instead of a duplicate chart.
async fn setup_chart(State(state): State<AppState>, Path(org_id): Path<Uuid>) -> impl IntoResponse {
    let chart_repo = ChartRepository::new((*state.db).clone());

    match chart_repo.has_standard_chart(org_id).await {
        Ok(true) => {
            return error_response(&AppError::Conflict(
                "the organization already has a chart of accounts".to_string(),
            ));
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Failed to check for existing chart");
            return internal_error();
        }
    }

    match chart_repo.setup_standard_chart(org_id).await {
        Ok(by_code) => {
            info!(org_id = %org_id, accounts = by_code.len(), "Standard chart provisioned");
            (
                StatusCode::CREATED,
                Json(json!({ "accounts_created": by_code.len() })),
            )
                .into_response()
        }
        Err(e) => {
            error!(org_id = %org_id, error = %e, "Chart provisioning failed");
            internal_error()
        }
    }
}

/// GET /organizations/{org_id}/chart/stats - Account counts by type.
async fn chart_stats(State(state): State<AppState>, Path(org_id): Path<Uuid>) -> impl IntoResponse {
    let chart_repo = ChartRepository::new((*state.db).clone());

    match chart_repo.has_standard_chart(org_id).await {
        Ok(false) => return not_found("chart of accounts"),
        Ok(true) => {}
        Err(e) => {
            error!(error = %e, "Failed to check for existing chart");
            return internal_error();
        }
    }

    match chart_repo.get_chart_stats(org_id).await {
        Ok(stats) => Json(json!(stats)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute chart stats");
            internal_error()
        }
    }
}

/// GET /organizations/{org_id}/chart/accounts - Full chart ordered by code.
async fn list_accounts(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    match ChartRepository::new((*state.db).clone())
        .list_accounts(org_id)
        .await
    {
        Ok(accounts) => Json(json!({ "accounts": accounts })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            internal_error()
        }
    }
}

/// PUT /organizations/{org_id}/chart/mappings - Upsert a per-tenant rubro
/// override consulted before the static routing table.
async fn set_category_mapping(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<CategoryMappingRequest>,
) -> impl IntoResponse {
    let resolver = AccountResolver::new((*state.db).clone());

    // Reject overrides pointing at unprovisioned codes up front.
    for code in [&payload.income_code, &payload.expense_code] {
        match resolver.find_active_by_code(org_id, code).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return error_response(&AppError::BusinessRule(format!(
                    "account '{code}' is not provisioned"
                )));
            }
            Err(e) => {
                error!(error = %e, "Failed to validate mapping codes");
                return internal_error();
            }
        }
    }

    match resolver
        .set_mapping_override(
            org_id,
            &payload.rubro,
            &payload.income_code,
            &payload.expense_code,
        )
        .await
    {
        Ok(mapping) => Json(json!(mapping)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to save category mapping");
            internal_error()
        }
    }
}
