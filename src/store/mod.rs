//! Collection-oriented store interface.
//!
//! The driver has no cross-collection populate, so every dereference is an
//! explicit query; this trait pins the shape of those queries down to simple
//! find/update primitives. The batched `*_by_ids` methods are the only way
//! callers may resolve a set of references — one round trip per collection,
//! never one per id. Implemented by [`mongo::MongoStore`] in production and
//! by an in-memory fake in the integration tests.

pub mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;

use crate::errors::AppError;
use crate::models::media::MediaItem;
use crate::models::notice::Notice;
use crate::models::payment::Payment;
use crate::models::report_card::ReportCard;
use crate::models::school::School;
use crate::models::sclass::SchoolClass;
use crate::models::secretary::Secretary;
use crate::models::student::{AttendanceRecord, ExamResult, Student};
use crate::models::subject::Subject;
use crate::models::teacher::Teacher;

pub use mongo::MongoStore;

#[async_trait]
pub trait Store: Send + Sync {
    // Students
    async fn find_student_by_school_id(
        &self,
        school_id: &str,
    ) -> Result<Option<Student>, AppError>;

    /// All students whose class reference equals `class`.
    async fn find_students_by_class(&self, class: ObjectId) -> Result<Vec<Student>, AppError>;

    /// `$set` the given fields on a student; returns false when no student
    /// matched the external id.
    async fn update_student(&self, school_id: &str, set: Document) -> Result<bool, AppError>;

    async fn push_attendance(
        &self,
        school_id: &str,
        record: AttendanceRecord,
    ) -> Result<bool, AppError>;

    async fn push_exam_result(
        &self,
        school_id: &str,
        result: ExamResult,
    ) -> Result<bool, AppError>;

    // Classes
    async fn find_class(&self, id: ObjectId) -> Result<Option<SchoolClass>, AppError>;
    async fn find_classes_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<SchoolClass>, AppError>;
    /// Classes of a school, sorted by class name.
    async fn list_classes_by_school(&self, school: ObjectId)
        -> Result<Vec<SchoolClass>, AppError>;

    // Subjects
    async fn find_subjects_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Subject>, AppError>;
    /// Subjects of a school, sorted by subject name.
    async fn list_subjects_by_school(&self, school: ObjectId) -> Result<Vec<Subject>, AppError>;

    // Teachers
    async fn find_teachers_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Teacher>, AppError>;
    async fn find_teacher_by_teacher_id(
        &self,
        teacher_id: &str,
    ) -> Result<Option<Teacher>, AppError>;

    // Schools (admin accounts)
    async fn find_school(&self, id: ObjectId) -> Result<Option<School>, AppError>;
    async fn find_school_by_name_and_code(
        &self,
        school_name: &str,
        access_code: &str,
    ) -> Result<Option<School>, AppError>;

    // Secretaries
    async fn find_secretary_by_secretary_id(
        &self,
        secretary_id: &str,
    ) -> Result<Option<Secretary>, AppError>;

    // Report cards
    /// Published report cards for a student, newest first.
    async fn find_published_report_cards(
        &self,
        student: ObjectId,
    ) -> Result<Vec<ReportCard>, AppError>;

    // Listings
    /// Notices of a school, newest first.
    async fn list_notices_by_school(&self, school: ObjectId) -> Result<Vec<Notice>, AppError>;
    /// Latest 10 media items uploaded by an admin.
    async fn list_media_by_admin(&self, admin: ObjectId) -> Result<Vec<MediaItem>, AppError>;
    /// Invoices for a student (by external id), newest first.
    async fn list_payments_by_student(&self, school_id: &str) -> Result<Vec<Payment>, AppError>;

    /// Connectivity check for the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}
