//! Student-scoped routes: dashboard, attendance, exam results, subjects,
//! payments, and the administrative write operations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::payment::PaymentView;
use crate::models::student::{
    AttendanceRecord, AttendanceRecordView, AttendanceStatus, ExamResult, MarksObtained,
    UpdateStudent,
};
use crate::models::subject::SubjectView;
use crate::routes::{lookup_timeout, MessageBody};
use crate::services::stats::{self, AttendanceStats, PaymentSummary};
use crate::services::student::{self as student_service, ExamResultView, StudentView};
use crate::AppState;

/// GET /api/student/{studentId}
pub async fn get_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<StudentView>, AppError> {
    let view = student_service::get_student_dashboard(
        state.store.as_ref(),
        lookup_timeout(&state),
        &student_id,
    )
    .await?;
    Ok(Json(view))
}

/// PUT /api/student/{studentId}
pub async fn update_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
    Json(body): Json<UpdateStudent>,
) -> Result<Json<StudentView>, AppError> {
    let view = student_service::update_student(
        state.store.as_ref(),
        lookup_timeout(&state),
        &student_id,
        body,
    )
    .await?;
    Ok(Json(view))
}

/// GET /api/attendance/{studentId}
pub async fn get_attendance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<AttendanceRecordView>>, AppError> {
    let records = student_service::get_attendance(state.store.as_ref(), &student_id).await?;
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAttendance {
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub sub_name: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// POST /api/attendance/{studentId}
pub async fn add_attendance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
    Json(body): Json<AddAttendance>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let subject = body
        .sub_name
        .as_deref()
        .map(ObjectId::parse_str)
        .transpose()
        .map_err(|_| AppError::BadRequest("Invalid subject ID".to_string()))?;

    let record = AttendanceRecord {
        date: body.date,
        status: body.status,
        subject,
        remarks: body.remarks,
    };
    student_service::add_attendance(state.store.as_ref(), &student_id, record).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::new("Attendance record added successfully")),
    ))
}

/// GET /api/attendance-stats/{studentId}
pub async fn get_attendance_stats(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<AttendanceStats>, AppError> {
    let student = student_service::find_student(state.store.as_ref(), &student_id).await?;
    Ok(Json(stats::attendance_stats(&student.attendance)))
}

/// GET /api/exam-results/{studentId}
pub async fn get_exam_results(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<ExamResultView>>, AppError> {
    let results = student_service::get_exam_results(
        state.store.as_ref(),
        lookup_timeout(&state),
        &student_id,
    )
    .await?;
    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExamResult {
    pub sub_name: String,
    #[serde(default)]
    pub marks_obtained: MarksObtained,
}

/// POST /api/exam-result/{studentId}
pub async fn add_exam_result(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
    Json(body): Json<AddExamResult>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let subject = ObjectId::parse_str(&body.sub_name)
        .map_err(|_| AppError::BadRequest("Invalid subject ID".to_string()))?;

    let result = ExamResult {
        subject,
        marks_obtained: body.marks_obtained,
    };
    student_service::add_exam_result(state.store.as_ref(), &student_id, result).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::new("Exam result added successfully")),
    ))
}

/// GET /api/student-subjects/{studentId}
pub async fn get_student_subjects(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<SubjectView>>, AppError> {
    let subjects = student_service::get_student_subjects(
        state.store.as_ref(),
        lookup_timeout(&state),
        &student_id,
    )
    .await?;
    Ok(Json(subjects))
}

/// GET /api/student-payments/{studentId}
pub async fn get_student_payments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<PaymentView>>, AppError> {
    let payments = state.store.list_payments_by_student(&student_id).await?;
    Ok(Json(payments.iter().map(PaymentView::from).collect()))
}

/// GET /api/payment-summary/{studentId} — fold over the same list the
/// payments endpoint returns.
pub async fn get_payment_summary(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<PaymentSummary>, AppError> {
    let payments = state.store.list_payments_by_student(&student_id).await?;
    Ok(Json(stats::payment_summary(&payments)))
}
