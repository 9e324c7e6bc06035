//! In-memory store for tests, with call counters on the batched lookups so
//! tests can assert the one-round-trip-per-collection discipline.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;
use chrono::{Duration, Utc};

use school_portal::errors::AppError;
use school_portal::models::media::MediaItem;
use school_portal::models::notice::Notice;
use school_portal::models::payment::Payment;
use school_portal::models::report_card::ReportCard;
use school_portal::models::school::School;
use school_portal::models::sclass::SchoolClass;
use school_portal::models::secretary::Secretary;
use school_portal::models::student::{AttendanceRecord, ExamResult, Student};
use school_portal::models::subject::Subject;
use school_portal::models::teacher::Teacher;
use school_portal::store::Store;

#[derive(Default)]
pub struct FakeStore {
    pub students: Mutex<Vec<Student>>,
    pub classes: Vec<SchoolClass>,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub schools: Vec<School>,
    pub secretaries: Vec<Secretary>,
    pub report_cards: Vec<ReportCard>,
    pub notices: Vec<Notice>,
    pub media: Vec<MediaItem>,
    pub payments: Vec<Payment>,
    pub subject_batches: AtomicUsize,
    pub teacher_batches: AtomicUsize,
    pub class_batches: AtomicUsize,
}

impl FakeStore {
    pub fn subject_batch_calls(&self) -> usize {
        self.subject_batches.load(Ordering::SeqCst)
    }

    pub fn teacher_batch_calls(&self) -> usize {
        self.teacher_batches.load(Ordering::SeqCst)
    }

    pub fn class_batch_calls(&self) -> usize {
        self.class_batches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn find_student_by_school_id(
        &self,
        school_id: &str,
    ) -> Result<Option<Student>, AppError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.school_id == school_id)
            .cloned())
    }

    async fn find_students_by_class(&self, class: ObjectId) -> Result<Vec<Student>, AppError> {
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.sclass == Some(class))
            .cloned()
            .collect())
    }

    async fn update_student(&self, school_id: &str, set: Document) -> Result<bool, AppError> {
        let mut students = self.students.lock().unwrap();
        let Some(student) = students.iter_mut().find(|s| s.school_id == school_id) else {
            return Ok(false);
        };
        for (key, value) in set {
            let value = value.as_str().map(String::from);
            match key.as_str() {
                "name" => student.name = value.unwrap_or_default(),
                "dob" => student.dob = value,
                "gender" => student.gender = value,
                "bloodGroup" => student.blood_group = value,
                "address" => student.address = value,
                "phone" => student.phone = value,
                "email" => student.email = value,
                "fatherName" => student.father_name = value,
                "motherName" => student.mother_name = value,
                "parentPhone" => student.parent_phone = value,
                "photo" => student.photo = value,
                _ => {}
            }
        }
        Ok(true)
    }

    async fn push_attendance(
        &self,
        school_id: &str,
        record: AttendanceRecord,
    ) -> Result<bool, AppError> {
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.school_id == school_id) {
            Some(student) => {
                student.attendance.push(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn push_exam_result(
        &self,
        school_id: &str,
        result: ExamResult,
    ) -> Result<bool, AppError> {
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.school_id == school_id) {
            Some(student) => {
                student.exam_results.push(result);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_class(&self, id: ObjectId) -> Result<Option<SchoolClass>, AppError> {
        Ok(self.classes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_classes_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<SchoolClass>, AppError> {
        self.class_batches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .classes
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn list_classes_by_school(
        &self,
        school: ObjectId,
    ) -> Result<Vec<SchoolClass>, AppError> {
        let mut classes: Vec<SchoolClass> = self
            .classes
            .iter()
            .filter(|c| c.school == Some(school))
            .cloned()
            .collect();
        classes.sort_by(|a, b| a.sclass_name.cmp(&b.sclass_name));
        Ok(classes)
    }

    async fn find_subjects_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Subject>, AppError> {
        self.subject_batches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .subjects
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect())
    }

    async fn list_subjects_by_school(&self, school: ObjectId) -> Result<Vec<Subject>, AppError> {
        let mut subjects: Vec<Subject> = self
            .subjects
            .iter()
            .filter(|s| s.school == Some(school))
            .cloned()
            .collect();
        subjects.sort_by(|a, b| a.sub_name.cmp(&b.sub_name));
        Ok(subjects)
    }

    async fn find_teachers_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Teacher>, AppError> {
        self.teacher_batches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .teachers
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn find_teacher_by_teacher_id(
        &self,
        teacher_id: &str,
    ) -> Result<Option<Teacher>, AppError> {
        Ok(self
            .teachers
            .iter()
            .find(|t| t.teacher_id == teacher_id)
            .cloned())
    }

    async fn find_school(&self, id: ObjectId) -> Result<Option<School>, AppError> {
        Ok(self.schools.iter().find(|s| s.id == id).cloned())
    }

    async fn find_school_by_name_and_code(
        &self,
        school_name: &str,
        access_code: &str,
    ) -> Result<Option<School>, AppError> {
        Ok(self
            .schools
            .iter()
            .find(|s| {
                s.school_name == school_name && s.access_code.as_deref() == Some(access_code)
            })
            .cloned())
    }

    async fn find_secretary_by_secretary_id(
        &self,
        secretary_id: &str,
    ) -> Result<Option<Secretary>, AppError> {
        Ok(self
            .secretaries
            .iter()
            .find(|s| s.secretary_id == secretary_id)
            .cloned())
    }

    async fn find_published_report_cards(
        &self,
        student: ObjectId,
    ) -> Result<Vec<ReportCard>, AppError> {
        let mut cards: Vec<ReportCard> = self
            .report_cards
            .iter()
            .filter(|c| {
                c.student == student
                    && c.status == school_portal::models::report_card::ReportStatus::Published
            })
            .cloned()
            .collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    async fn list_notices_by_school(&self, school: ObjectId) -> Result<Vec<Notice>, AppError> {
        let mut notices: Vec<Notice> = self
            .notices
            .iter()
            .filter(|n| n.school == Some(school))
            .cloned()
            .collect();
        notices.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(notices)
    }

    async fn list_media_by_admin(&self, admin: ObjectId) -> Result<Vec<MediaItem>, AppError> {
        let mut media: Vec<MediaItem> = self
            .media
            .iter()
            .filter(|m| m.admin_id == admin)
            .cloned()
            .collect();
        media.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        media.truncate(10);
        Ok(media)
    }

    async fn list_payments_by_student(&self, school_id: &str) -> Result<Vec<Payment>, AppError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.student == school_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(payments)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

// Fixture builders.

pub fn student(school_id: &str, name: &str) -> Student {
    Student {
        id: ObjectId::new(),
        school_id: school_id.to_string(),
        name: name.to_string(),
        dob: None,
        gender: None,
        blood_group: None,
        address: None,
        phone: None,
        email: None,
        father_name: None,
        mother_name: None,
        parent_phone: None,
        photo: None,
        school: None,
        sclass: None,
        exam_results: Vec::new(),
        attendance: Vec::new(),
    }
}

pub fn subject(name: &str, code: &str) -> Subject {
    Subject {
        id: ObjectId::new(),
        sub_name: name.to_string(),
        sub_code: code.to_string(),
        sessions: None,
        teacher: None,
        school: None,
    }
}

pub fn teacher(teacher_id: &str, name: &str) -> Teacher {
    Teacher {
        id: ObjectId::new(),
        teacher_id: teacher_id.to_string(),
        name: name.to_string(),
        email: None,
        school: None,
    }
}

pub fn class(name: &str, subjects: Vec<ObjectId>) -> SchoolClass {
    SchoolClass {
        id: ObjectId::new(),
        sclass_name: name.to_string(),
        school: None,
        subjects,
    }
}

pub fn report_card(
    student: ObjectId,
    status: school_portal::models::report_card::ReportStatus,
    age_days: i64,
) -> ReportCard {
    ReportCard {
        id: ObjectId::new(),
        student,
        sclass: None,
        subjects: Vec::new(),
        term: "Term 1".to_string(),
        academic_year: "2024".to_string(),
        status,
        overall_grade: None,
        average_percentage: None,
        created_at: Utc::now() - Duration::days(age_days),
    }
}
