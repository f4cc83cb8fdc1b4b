//! Organization (tenant) management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::error_response;
use crate::AppState;
use obra_db::repositories::CreateOrganizationInput;
use obra_db::{ChartRepository, OrganizationRepository};
use obra_shared::AppError;

/// Creates the organizations router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations", post(create_organization))
        .route("/organizations", get(list_organizations))
        .route("/organizations/{org_id}", get(get_organization))
        .route("/organizations/{org_id}/accounting", patch(set_accounting))
}

/// Request body for creating an organization.
#[derive(Debug, Deserialize)]
struct CreateOrganizationRequest {
    name: String,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    enable_accounting: bool,
}

fn default_currency() -> String {
    "ARS".to_string()
}

/// Request body for toggling the accounting module.
#[derive(Debug, Deserialize)]
struct SetAccountingRequest {
    enabled: bool,
}

/// POST /organizations - Create a tenant; provisions the standard chart when
/// accounting is enabled at creation.
async fn create_organization(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrganizationRequest>,
) -> impl IntoResponse {
    let org_repo = OrganizationRepository::new((*state.db).clone());

    let org = match org_repo
        .create(CreateOrganizationInput {
            name: payload.name,
            currency: payload.currency,
            enable_accounting: payload.enable_accounting,
        })
        .await
    {
        Ok(o) => o,
        Err(e) => {
            error!(error = %e, "Failed to create organization");
            return internal_error();
        }
    };

    let mut chart_provisioned = false;
    if org.enable_accounting {
        chart_provisioned = provision_chart_once(&state, org.id).await;
    }

    info!(org_id = %org.id, name = %org.name, "Organization created");

    (
        StatusCode::CREATED,
        Json(json!({
            "id": org.id,
            "name": org.name,
            "currency": org.currency,
            "enable_accounting": org.enable_accounting,
            "chart_provisioned": chart_provisioned,
            "created_at": org.created_at
        })),
    )
        .into_response()
}

/// GET /organizations - List active tenants.
async fn list_organizations(State(state): State<AppState>) -> impl IntoResponse {
    match OrganizationRepository::new((*state.db).clone())
        .list_active()
        .await
    {
        Ok(orgs) => Json(json!({ "organizations": orgs })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list organizations");
            internal_error()
        }
    }
}

/// GET /organizations/{org_id} - Fetch one tenant.
async fn get_organization(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
) -> impl IntoResponse {
    match OrganizationRepository::new((*state.db).clone())
        .find_by_id(org_id)
        .await
    {
        Ok(Some(org)) => Json(json!(org)).into_response(),
        Ok(None) => not_found("organization"),
        Err(e) => {
            error!(error = %e, "Failed to fetch organization");
            internal_error()
        }
    }
}

/// PATCH /organizations/{org_id}/accounting - Enable or disable the
/// accounting module; enabling provisions the chart if it is missing.
async fn set_accounting(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Json(payload): Json<SetAccountingRequest>,
) -> impl IntoResponse {
    let org = match OrganizationRepository::new((*state.db).clone())
        .set_accounting_enabled(org_id, payload.enabled)
        .await
    {
        Ok(o) => o,
        Err(sea_orm::DbErr::RecordNotFound(_)) => return not_found("organization"),
        Err(e) => {
            error!(error = %e, "Failed to update accounting flag");
            return internal_error();
        }
    };

    let mut chart_provisioned = false;
    if payload.enabled {
        chart_provisioned = provision_chart_once(&state, org.id).await;
    }

    Json(json!({
        "id": org.id,
        "enable_accounting": org.enable_accounting,
        "chart_provisioned": chart_provisioned
    }))
    .into_response()
}

/// Provisions the standard chart unless the tenant already has one.
/// Provisioning failures are logged, not surfaced: the tenant write stands.
async fn provision_chart_once(state: &AppState, org_id: Uuid) -> bool {
    let chart_repo = ChartRepository::new((*state.db).clone());
    match chart_repo.has_standard_chart(org_id).await {
        Ok(true) => false,
        Ok(false) => match chart_repo.setup_standard_chart(org_id).await {
            Ok(_) => true,
            Err(e) => {
                error!(org_id = %org_id, error = %e, "Chart provisioning failed");
                false
            }
        },
        Err(e) => {
            error!(org_id = %org_id, error = %e, "Chart lookup failed");
            false
        }
    }
}

pub(crate) fn internal_error() -> axum::response::Response {
    error_response(&AppError::Internal("an error occurred".to_string()))
}

pub(crate) fn not_found(what: &str) -> axum::response::Response {
    error_response(&AppError::NotFound(what.to_string()))
}
