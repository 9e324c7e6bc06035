//! Class aggregate builder: the roster view used by both the school-scoped
//! class browser and a student's own "my class" screen.

use std::collections::HashSet;
use std::time::Duration;

use bson::oid::ObjectId;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::sclass::SchoolClass;
use crate::models::subject::{Subject, SubjectView};
use crate::models::teacher::TeacherView;
use crate::services::resolver::{resolve_list, resolve_many};
use crate::services::student::find_student;
use crate::store::Store;

/// Roster line for a class member.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: String,
    pub school_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Fully dereferenced class view: roster, subjects in class order, and the
/// distinct teachers behind those subjects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassView {
    pub id: String,
    pub sclass_name: String,
    pub students: Vec<StudentSummary>,
    pub teachers: Vec<TeacherView>,
    pub subjects: Vec<SubjectView>,
    pub students_count: usize,
    pub teachers_count: usize,
    pub subjects_count: usize,
}

/// Build the class view from an already-fetched root class document.
///
/// The roster lookup and the subject batch are independent and run
/// concurrently; teachers depend on the resolved subjects and follow as a
/// third, batched round trip.
async fn build_class_view(
    store: &dyn Store,
    timeout: Duration,
    class: SchoolClass,
) -> ClassView {
    let students = resolve_list(timeout, || store.find_students_by_class(class.id));
    let subjects = async {
        let mut resolved = resolve_many(&class.subjects, timeout, |ids| async move {
            store.find_subjects_by_ids(&ids).await
        })
        .await;
        // Preserve the class's subject order.
        class
            .subjects
            .iter()
            .filter_map(|id| resolved.remove(id))
            .collect::<Vec<Subject>>()
    };
    let (students, subjects) = tokio::join!(students, subjects);

    let mut seen = HashSet::new();
    let teacher_ids: Vec<ObjectId> = subjects
        .iter()
        .filter_map(|s| s.teacher)
        .filter(|id| seen.insert(*id))
        .collect();
    let mut teachers_by_id = resolve_many(&teacher_ids, timeout, |ids| async move {
        store.find_teachers_by_ids(&ids).await
    })
    .await;
    let teachers: Vec<TeacherView> = teacher_ids
        .iter()
        .filter_map(|id| teachers_by_id.remove(id))
        .map(|t| TeacherView::from(&t))
        .collect();

    let students: Vec<StudentSummary> = students
        .iter()
        .map(|s| StudentSummary {
            id: s.id.to_hex(),
            school_id: s.school_id.clone(),
            name: s.name.clone(),
            photo: s.photo.clone(),
        })
        .collect();
    let subjects: Vec<SubjectView> = subjects.iter().map(SubjectView::from).collect();

    ClassView {
        id: class.id.to_hex(),
        sclass_name: class.sclass_name,
        students_count: students.len(),
        teachers_count: teachers.len(),
        subjects_count: subjects.len(),
        students,
        teachers,
        subjects,
    }
}

/// Class details by class id; the class itself is the root entity.
pub async fn get_class_details(
    store: &dyn Store,
    timeout: Duration,
    class_id: ObjectId,
) -> Result<ClassView, AppError> {
    let class = store
        .find_class(class_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;
    Ok(build_class_view(store, timeout, class).await)
}

/// Class details for a student's own class; derives the class id from the
/// student record first.
pub async fn get_student_class_details(
    store: &dyn Store,
    timeout: Duration,
    school_id: &str,
) -> Result<ClassView, AppError> {
    let student = find_student(store, school_id).await?;
    let class_id = student.sclass.ok_or_else(|| {
        AppError::NotFound("Student not assigned to any class".to_string())
    })?;
    get_class_details(store, timeout, class_id).await
}
