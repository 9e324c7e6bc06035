//! Class routes: school-scoped listing and the two class-detail views.

use axum::extract::{Path, State};
use axum::Json;
use bson::oid::ObjectId;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::sclass::ClassSummary;
use crate::routes::lookup_timeout;
use crate::services::class::{self as class_service, ClassView};
use crate::AppState;

/// GET /api/classes — classes of the caller's school, sorted by name.
pub async fn list_classes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<ClassSummary>>, AppError> {
    let classes = state.store.list_classes_by_school(user.school).await?;
    Ok(Json(classes.iter().map(ClassSummary::from).collect()))
}

/// GET /api/class-details/{classId}
pub async fn get_class_details(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(class_id): Path<String>,
) -> Result<Json<ClassView>, AppError> {
    let class_id = ObjectId::parse_str(&class_id)
        .map_err(|_| AppError::BadRequest("Invalid class ID".to_string()))?;
    let view =
        class_service::get_class_details(state.store.as_ref(), lookup_timeout(&state), class_id)
            .await?;
    Ok(Json(view))
}

/// GET /api/student-class-details/{studentId} — the student's own class.
pub async fn get_student_class_details(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<ClassView>, AppError> {
    let view = class_service::get_student_class_details(
        state.store.as_ref(),
        lookup_timeout(&state),
        &student_id,
    )
    .await?;
    Ok(Json(view))
}
