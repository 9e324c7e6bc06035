//! School- and role-scoped listings: notices, subjects, media.

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::media::MediaView;
use crate::models::notice::NoticeView;
use crate::models::subject::SubjectView;
use crate::AppState;

/// GET /api/notices — the caller's school, newest first.
pub async fn get_notices(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<NoticeView>>, AppError> {
    let notices = state.store.list_notices_by_school(user.school).await?;
    Ok(Json(notices.iter().map(NoticeView::from).collect()))
}

/// GET /api/subjects — the caller's school, sorted by subject name.
pub async fn get_subjects(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<SubjectView>>, AppError> {
    let subjects = state.store.list_subjects_by_school(user.school).await?;
    Ok(Json(subjects.iter().map(SubjectView::from).collect()))
}

/// GET /api/media — latest items uploaded by the caller's school admin.
pub async fn get_media(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<MediaView>>, AppError> {
    let media = state.store.list_media_by_admin(user.id).await?;
    Ok(Json(media.iter().map(MediaView::from).collect()))
}
