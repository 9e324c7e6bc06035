//! Student aggregate builder: dashboard, subjects, attendance, exam results,
//! and the administrative student mutations.

use std::time::Duration;

use bson::oid::ObjectId;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::school::SchoolInfo;
use crate::models::student::{
    AttendanceRecord, AttendanceRecordView, ExamResult, MarksObtained, Student, UpdateStudent,
};
use crate::models::subject::SubjectView;
use crate::services::resolver::{resolve_many, resolve_one};
use crate::store::Store;

/// Class reference, dereferenced to its display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: String,
    pub sclass_name: String,
}

/// Subject slot of an exam result. A dangling reference keeps the marks and
/// substitutes the placeholder name; `id` is absent in that case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub sub_name: String,
    pub sub_code: String,
}

impl ExamSubject {
    /// Placeholder for a subject deleted after the marks were entered.
    pub fn unknown() -> Self {
        Self {
            id: None,
            sub_name: "Unknown Subject".to_string(),
            sub_code: "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResultView {
    pub subject: ExamSubject,
    pub marks_obtained: MarksObtained,
}

/// Fully dereferenced student dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub id: String,
    pub school_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sclass: Option<ClassInfo>,
    pub subjects_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_info: Option<SchoolInfo>,
    pub exam_results: Vec<ExamResultView>,
    pub attendance: Vec<AttendanceRecordView>,
}

/// Fetch the root student record, failing the request if absent.
pub async fn find_student(store: &dyn Store, school_id: &str) -> Result<Student, AppError> {
    store
        .find_student_by_school_id(school_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
}

/// Build the dashboard view. After the root fetch, the class chain, the
/// school info, and the exam subject batch are three independent lookups and
/// run concurrently; inside the class chain, class before subjects is a true
/// dependency and stays sequential.
pub async fn get_student_dashboard(
    store: &dyn Store,
    timeout: Duration,
    school_id: &str,
) -> Result<StudentView, AppError> {
    let student = find_student(store, school_id).await?;

    let class_chain = async {
        let class = resolve_one(student.sclass, timeout, |id| store.find_class(id)).await;
        match class {
            Some(class) => {
                let subjects = resolve_many(&class.subjects, timeout, |ids| async move {
                    store.find_subjects_by_ids(&ids).await
                })
                .await;
                (
                    Some(ClassInfo {
                        id: class.id.to_hex(),
                        sclass_name: class.sclass_name.clone(),
                    }),
                    // Canonical derivation: count the resolved subject list,
                    // never a stored denormalized field.
                    subjects.len(),
                )
            }
            None => (None, 0),
        }
    };

    let school_info = async {
        resolve_one(student.school, timeout, |id| store.find_school(id))
            .await
            .map(|school| SchoolInfo::from(&school))
    };

    let exam_results = resolve_exam_results(store, timeout, &student.exam_results);

    let ((sclass, subjects_count), school_info, exam_results) =
        tokio::join!(class_chain, school_info, exam_results);

    Ok(StudentView {
        id: student.id.to_hex(),
        school_id: student.school_id,
        name: student.name,
        dob: student.dob,
        gender: student.gender,
        blood_group: student.blood_group,
        address: student.address,
        phone: student.phone,
        email: student.email,
        father_name: student.father_name,
        mother_name: student.mother_name,
        parent_phone: student.parent_phone,
        photo: student.photo,
        sclass,
        subjects_count,
        school_info,
        exam_results,
        attendance: student.attendance.iter().map(AttendanceRecordView::from).collect(),
    })
}

/// Dereference exam-result subjects in one batched lookup. A dangling
/// subject keeps its mark data with the placeholder; results are never
/// dropped.
pub async fn resolve_exam_results(
    store: &dyn Store,
    timeout: Duration,
    results: &[ExamResult],
) -> Vec<ExamResultView> {
    let subject_ids: Vec<ObjectId> = results.iter().map(|r| r.subject).collect();
    let subjects = resolve_many(&subject_ids, timeout, |ids| async move {
        store.find_subjects_by_ids(&ids).await
    })
    .await;

    results
        .iter()
        .map(|result| ExamResultView {
            subject: subjects
                .get(&result.subject)
                .map(|s| ExamSubject {
                    id: Some(s.id.to_hex()),
                    sub_name: s.sub_name.clone(),
                    sub_code: s.sub_code.clone(),
                })
                .unwrap_or_else(ExamSubject::unknown),
            marks_obtained: result.marks_obtained.clone(),
        })
        .collect()
}

/// Exam results for a student, subjects dereferenced.
pub async fn get_exam_results(
    store: &dyn Store,
    timeout: Duration,
    school_id: &str,
) -> Result<Vec<ExamResultView>, AppError> {
    let student = find_student(store, school_id).await?;
    Ok(resolve_exam_results(store, timeout, &student.exam_results).await)
}

/// Raw attendance list for a student.
pub async fn get_attendance(
    store: &dyn Store,
    school_id: &str,
) -> Result<Vec<AttendanceRecordView>, AppError> {
    let student = find_student(store, school_id).await?;
    Ok(student.attendance.iter().map(AttendanceRecordView::from).collect())
}

/// Subjects of the student's class, in the class's subject order. A student
/// without a class, a dangling class reference, or a class without subjects
/// all yield an empty list.
pub async fn get_student_subjects(
    store: &dyn Store,
    timeout: Duration,
    school_id: &str,
) -> Result<Vec<SubjectView>, AppError> {
    let student = find_student(store, school_id).await?;

    let Some(class) = resolve_one(student.sclass, timeout, |id| store.find_class(id)).await
    else {
        return Ok(Vec::new());
    };

    let mut subjects = resolve_many(&class.subjects, timeout, |ids| async move {
        store.find_subjects_by_ids(&ids).await
    })
    .await;

    Ok(class
        .subjects
        .iter()
        .filter_map(|id| subjects.remove(id))
        .map(|s| SubjectView::from(&s))
        .collect())
}

/// Apply a partial update to the student's own fields, then re-read the
/// updated aggregate so the caller observes its own write.
pub async fn update_student(
    store: &dyn Store,
    timeout: Duration,
    school_id: &str,
    update: UpdateStudent,
) -> Result<StudentView, AppError> {
    let set = update.to_set_document();
    if !set.is_empty() {
        let matched = store.update_student(school_id, set).await?;
        if !matched {
            return Err(AppError::NotFound("Student not found".to_string()));
        }
    }
    get_student_dashboard(store, timeout, school_id).await
}

/// Append an attendance record to the student's embedded list.
pub async fn add_attendance(
    store: &dyn Store,
    school_id: &str,
    record: AttendanceRecord,
) -> Result<(), AppError> {
    let matched = store.push_attendance(school_id, record).await?;
    if !matched {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    Ok(())
}

/// Append an exam result to the student's embedded list.
pub async fn add_exam_result(
    store: &dyn Store,
    school_id: &str,
    result: ExamResult,
) -> Result<(), AppError> {
    let matched = store.push_exam_result(school_id, result).await?;
    if !matched {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    Ok(())
}
