//! Report card route.

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::routes::lookup_timeout;
use crate::services::reports::{self as report_service, ReportCardView};
use crate::AppState;

/// GET /api/report-cards/{studentId} — published cards only, newest first.
pub async fn get_report_cards(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<ReportCardView>>, AppError> {
    let cards = report_service::get_report_cards(
        state.store.as_ref(),
        lookup_timeout(&state),
        &student_id,
    )
    .await?;
    Ok(Json(cards))
}
