//! Report card aggregate builder.
//!
//! This is the deepest fan-out in the system: every card references a class,
//! and every per-subject row references a subject and a teacher. All three
//! reference sets are collected across the whole card list up front and
//! resolved in one batched lookup per collection, instead of resolving row
//! by row.

use std::time::Duration;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::report_card::{Assessments, ReportCard, ReportStatus};
use crate::models::subject::SubjectView;
use crate::models::teacher::TeacherView;
use crate::services::resolver::resolve_many;
use crate::services::student::{find_student, ClassInfo};
use crate::store::Store;

/// One per-subject row, references dereferenced. Dangling subject or teacher
/// entries keep their assessment data with the reference absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReportView {
    pub subject: Option<SubjectView>,
    pub teacher: Option<TeacherView>,
    pub assessments: Assessments,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCardView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sclass: Option<ClassInfo>,
    pub subjects: Vec<SubjectReportView>,
    pub term: String,
    pub academic_year: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_percentage: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Published report cards for a student, newest first, fully dereferenced.
pub async fn get_report_cards(
    store: &dyn Store,
    timeout: Duration,
    school_id: &str,
) -> Result<Vec<ReportCardView>, AppError> {
    let student = find_student(store, school_id).await?;
    let cards = store.find_published_report_cards(student.id).await?;
    Ok(resolve_report_cards(store, timeout, cards).await)
}

async fn resolve_report_cards(
    store: &dyn Store,
    timeout: Duration,
    cards: Vec<ReportCard>,
) -> Vec<ReportCardView> {
    let class_ids: Vec<ObjectId> = cards.iter().filter_map(|c| c.sclass).collect();
    let subject_ids: Vec<ObjectId> = cards
        .iter()
        .flat_map(|c| c.subjects.iter().filter_map(|s| s.subject))
        .collect();
    let teacher_ids: Vec<ObjectId> = cards
        .iter()
        .flat_map(|c| c.subjects.iter().filter_map(|s| s.teacher))
        .collect();

    // Three independent collections; resolve them concurrently, one batched
    // round trip each.
    let (classes, subjects, teachers) = tokio::join!(
        resolve_many(&class_ids, timeout, |ids| async move {
            store.find_classes_by_ids(&ids).await
        }),
        resolve_many(&subject_ids, timeout, |ids| async move {
            store.find_subjects_by_ids(&ids).await
        }),
        resolve_many(&teacher_ids, timeout, |ids| async move {
            store.find_teachers_by_ids(&ids).await
        }),
    );

    cards
        .into_iter()
        .map(|card| ReportCardView {
            id: card.id.to_hex(),
            sclass: card.sclass.and_then(|id| classes.get(&id)).map(|c| ClassInfo {
                id: c.id.to_hex(),
                sclass_name: c.sclass_name.clone(),
            }),
            subjects: card
                .subjects
                .into_iter()
                .map(|row| SubjectReportView {
                    subject: row
                        .subject
                        .and_then(|id| subjects.get(&id))
                        .map(SubjectView::from),
                    teacher: row
                        .teacher
                        .and_then(|id| teachers.get(&id))
                        .map(TeacherView::from),
                    assessments: row.assessments,
                    grade: row.grade,
                })
                .collect(),
            term: card.term,
            academic_year: card.academic_year,
            status: card.status,
            overall_grade: card.overall_grade,
            average_percentage: card.average_percentage,
            created_at: card.created_at,
        })
        .collect()
}
