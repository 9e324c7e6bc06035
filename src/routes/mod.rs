//! Route definitions for the portal API.

pub mod auth;
pub mod classes;
pub mod health;
pub mod listings;
pub mod reports;
pub mod students;

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Confirmation body for write endpoints.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Per-lookup timeout used by the aggregate builders.
pub(crate) fn lookup_timeout(state: &AppState) -> Duration {
    Duration::from_millis(state.config.lookup_timeout_ms)
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/api/login", post(auth::login))
        .route(
            "/api/student/{student_id}",
            get(students::get_student).put(students::update_student),
        )
        .route(
            "/api/attendance/{student_id}",
            get(students::get_attendance).post(students::add_attendance),
        )
        .route(
            "/api/attendance-stats/{student_id}",
            get(students::get_attendance_stats),
        )
        .route("/api/exam-results/{student_id}", get(students::get_exam_results))
        .route("/api/exam-result/{student_id}", post(students::add_exam_result))
        .route(
            "/api/student-subjects/{student_id}",
            get(students::get_student_subjects),
        )
        .route(
            "/api/student-payments/{student_id}",
            get(students::get_student_payments),
        )
        .route(
            "/api/payment-summary/{student_id}",
            get(students::get_payment_summary),
        )
        .route("/api/classes", get(classes::list_classes))
        .route("/api/class-details/{class_id}", get(classes::get_class_details))
        .route(
            "/api/student-class-details/{student_id}",
            get(classes::get_student_class_details),
        )
        .route("/api/report-cards/{student_id}", get(reports::get_report_cards))
        .route("/api/notices", get(listings::get_notices))
        .route("/api/subjects", get(listings::get_subjects))
        .route("/api/media", get(listings::get_media))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
