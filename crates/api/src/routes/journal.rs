//! Journal listing and lifecycle routes.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::error_response;
use crate::routes::organizations::{internal_error, not_found};
use crate::AppState;
use obra_shared::AppError;
use obra_core::journal::SourceType;
use obra_db::repositories::JournalFilter;
use obra_db::JournalRepository;

/// Creates the journal router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/organizations/{org_id}/journal", get(list_entries))
        .route(
            "/organizations/{org_id}/journal/{entry_number}",
            delete(delete_entry_group),
        )
        .route(
            "/journal/sources/{source_type}/{source_id}",
            delete(delete_by_source),
        )
}

/// Query parameters for listing journal entries.
#[derive(Debug, Deserialize)]
struct ListQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    account_id: Option<Uuid>,
    source_type: Option<String>,
    is_automatic: Option<bool>,
}

/// GET /organizations/{org_id}/journal - Filterable entry listing.
async fn list_entries(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let source_type = match query.source_type.as_deref() {
        Some(raw) => match SourceType::parse(raw) {
            Some(st) => Some(st),
            None => {
                return error_response(&AppError::Validation(format!(
                    "unknown source type '{raw}'"
                )));
            }
        },
        None => None,
    };

    let filter = JournalFilter {
        from: query.from,
        to: query.to,
        account_id: query.account_id,
        source_type,
        is_automatic: query.is_automatic,
    };

    match JournalRepository::new((*state.db).clone())
        .list_entries(org_id, filter)
        .await
    {
        Ok(entries) => Json(json!({ "entries": entries })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list journal entries");
            internal_error()
        }
    }
}

/// DELETE /organizations/{org_id}/journal/{entry_number} - Remove every leg
/// of one entry; deleting a single leg would corrupt the balance invariant.
async fn delete_entry_group(
    State(state): State<AppState>,
    Path((org_id, entry_number)): Path<(Uuid, String)>,
) -> impl IntoResponse {
    match JournalRepository::new((*state.db).clone())
        .delete_entry_group(org_id, &entry_number)
        .await
    {
        Ok(0) => not_found("journal entry"),
        Ok(deleted) => {
            info!(org_id = %org_id, entry_number = %entry_number, legs = deleted, "Journal entry deleted");
            Json(json!({ "deleted_legs": deleted })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete journal entry");
            internal_error()
        }
    }
}

/// DELETE /journal/sources/{source_type}/{source_id} - Reversal: remove all
/// automatic entries for one business object.
async fn delete_by_source(
    State(state): State<AppState>,
    Path((source_type, source_id)): Path<(String, Uuid)>,
) -> impl IntoResponse {
    let Some(source_type) = SourceType::parse(&source_type) else {
        return error_response(&AppError::Validation(format!(
            "unknown source type '{source_type}'"
        )));
    };

    match JournalRepository::new((*state.db).clone())
        .delete_automatic_entries(source_type, source_id)
        .await
    {
        Ok(deleted) => {
            info!(
                source_type = source_type.as_str(),
                source_id = %source_id,
                legs = deleted,
                "Automatic entries deleted"
            );
            Json(json!({ "deleted_legs": deleted })).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete automatic entries");
            internal_error()
        }
    }
}
