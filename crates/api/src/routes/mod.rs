//! API route definitions.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};

use crate::AppState;
use obra_shared::AppError;

pub mod bills;
pub mod chart;
pub mod health;
pub mod journal;
pub mod organizations;
pub mod payments;
pub mod payrolls;
pub mod treasury;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(organizations::routes())
        .merge(chart::routes())
        .merge(journal::routes())
        .merge(bills::routes())
        .merge(treasury::routes())
        .merge(payments::routes())
        .merge(payrolls::routes())
}

/// Renders an [`AppError`] as a JSON error response.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(serde_json::json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Logs an accounting outcome without letting it affect the primary write.
///
/// Returns the posted entry number when one was created, for inclusion in
/// the response body.
pub(crate) fn report_accounting(
    source: &str,
    outcome: Result<Option<obra_db::repositories::PostedEntry>, obra_db::repositories::JournalError>,
) -> Option<String> {
    match outcome {
        Ok(Some(posted)) => {
            tracing::info!(
                source,
                entry_number = %posted.entry_number,
                "Automatic journal entry posted"
            );
            Some(posted.entry_number)
        }
        Ok(None) => None,
        Err(e) => {
            // Fail open: the business write already succeeded.
            tracing::error!(source, error = %e, "Automatic journal entry failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obra_db::repositories::PostedEntry;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::NotFound("organization".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::Validation("bad source type".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Conflict("chart already set up".into()), StatusCode::CONFLICT)]
    #[case(
        AppError::BusinessRule("percentages must sum to 100".into()),
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[case(AppError::Internal("an error occurred".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_error_response_status(#[case] err: AppError, #[case] expected: StatusCode) {
        let response = error_response(&err);
        assert_eq!(response.status(), expected);
    }

    #[test]
    fn test_report_accounting_returns_entry_number_on_post() {
        let posted = PostedEntry {
            entry_number: "000007".to_string(),
            legs: vec![],
        };
        assert_eq!(
            report_accounting("bill", Ok(Some(posted))),
            Some("000007".to_string())
        );
    }

    #[test]
    fn test_report_accounting_is_none_when_accounting_declined() {
        assert_eq!(report_accounting("bill", Ok(None)), None);
    }

    #[test]
    fn test_report_accounting_swallows_failures() {
        let err = obra_core::journal::AccountingError::InsufficientLegs.into();
        assert_eq!(report_accounting("bill", Err(err)), None);
    }
}
