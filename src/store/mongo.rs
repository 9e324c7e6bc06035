//! MongoDB implementation of the [`Store`] trait.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};

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
use crate::store::Store;

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn students(&self) -> Collection<Student> {
        self.database.collection("students")
    }

    fn classes(&self) -> Collection<SchoolClass> {
        self.database.collection("sclasses")
    }

    fn subjects(&self) -> Collection<Subject> {
        self.database.collection("subjects")
    }

    fn teachers(&self) -> Collection<Teacher> {
        self.database.collection("teachers")
    }

    fn schools(&self) -> Collection<School> {
        self.database.collection("admins")
    }

    fn secretaries(&self) -> Collection<Secretary> {
        self.database.collection("secretaries")
    }

    fn report_cards(&self) -> Collection<ReportCard> {
        self.database.collection("reportcards")
    }

    fn notices(&self) -> Collection<Notice> {
        self.database.collection("notices")
    }

    fn media(&self) -> Collection<MediaItem> {
        self.database.collection("media")
    }

    fn payments(&self) -> Collection<Payment> {
        self.database.collection("payments")
    }

    /// One batched `$in` query against `collection`. An empty id set short
    /// circuits without touching the store.
    async fn find_by_ids<T>(
        &self,
        collection: Collection<T>,
        ids: &[ObjectId],
    ) -> Result<Vec<T>, AppError>
    where
        T: serde::de::DeserializeOwned + Send + Sync + Unpin,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        let cursor = collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_sorted<T>(
        &self,
        collection: Collection<T>,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<T>, AppError>
    where
        T: serde::de::DeserializeOwned + Send + Sync + Unpin,
    {
        let cursor = collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn find_student_by_school_id(
        &self,
        school_id: &str,
    ) -> Result<Option<Student>, AppError> {
        Ok(self
            .students()
            .find_one(doc! { "schoolId": school_id })
            .await?)
    }

    async fn find_students_by_class(&self, class: ObjectId) -> Result<Vec<Student>, AppError> {
        let cursor = self
            .students()
            .find(doc! { "sclassName": class })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_student(&self, school_id: &str, set: Document) -> Result<bool, AppError> {
        let result = self
            .students()
            .update_one(doc! { "schoolId": school_id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn push_attendance(
        &self,
        school_id: &str,
        record: AttendanceRecord,
    ) -> Result<bool, AppError> {
        let record = bson::to_bson(&record)
            .map_err(|e| AppError::Internal(format!("Attendance encoding failed: {e}")))?;
        let result = self
            .students()
            .update_one(
                doc! { "schoolId": school_id },
                doc! { "$push": { "attendance": record } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn push_exam_result(
        &self,
        school_id: &str,
        result: ExamResult,
    ) -> Result<bool, AppError> {
        let result = bson::to_bson(&result)
            .map_err(|e| AppError::Internal(format!("Exam result encoding failed: {e}")))?;
        let update = self
            .students()
            .update_one(
                doc! { "schoolId": school_id },
                doc! { "$push": { "examResult": result } },
            )
            .await?;
        Ok(update.matched_count > 0)
    }

    async fn find_class(&self, id: ObjectId) -> Result<Option<SchoolClass>, AppError> {
        Ok(self.classes().find_one(doc! { "_id": id }).await?)
    }

    async fn find_classes_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<SchoolClass>, AppError> {
        self.find_by_ids(self.classes(), ids).await
    }

    async fn list_classes_by_school(
        &self,
        school: ObjectId,
    ) -> Result<Vec<SchoolClass>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "sclassName": 1 })
            .build();
        self.find_sorted(self.classes(), doc! { "school": school }, options)
            .await
    }

    async fn find_subjects_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Subject>, AppError> {
        self.find_by_ids(self.subjects(), ids).await
    }

    async fn list_subjects_by_school(&self, school: ObjectId) -> Result<Vec<Subject>, AppError> {
        let options = FindOptions::builder().sort(doc! { "subName": 1 }).build();
        self.find_sorted(self.subjects(), doc! { "school": school }, options)
            .await
    }

    async fn find_teachers_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Teacher>, AppError> {
        self.find_by_ids(self.teachers(), ids).await
    }

    async fn find_teacher_by_teacher_id(
        &self,
        teacher_id: &str,
    ) -> Result<Option<Teacher>, AppError> {
        Ok(self
            .teachers()
            .find_one(doc! { "teacherId": teacher_id })
            .await?)
    }

    async fn find_school(&self, id: ObjectId) -> Result<Option<School>, AppError> {
        Ok(self.schools().find_one(doc! { "_id": id }).await?)
    }

    async fn find_school_by_name_and_code(
        &self,
        school_name: &str,
        access_code: &str,
    ) -> Result<Option<School>, AppError> {
        Ok(self
            .schools()
            .find_one(doc! { "schoolName": school_name, "accessCode": access_code })
            .await?)
    }

    async fn find_secretary_by_secretary_id(
        &self,
        secretary_id: &str,
    ) -> Result<Option<Secretary>, AppError> {
        Ok(self
            .secretaries()
            .find_one(doc! { "secretaryId": secretary_id })
            .await?)
    }

    async fn find_published_report_cards(
        &self,
        student: ObjectId,
    ) -> Result<Vec<ReportCard>, AppError> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        self.find_sorted(
            self.report_cards(),
            doc! { "student": student, "status": "Published" },
            options,
        )
        .await
    }

    async fn list_notices_by_school(&self, school: ObjectId) -> Result<Vec<Notice>, AppError> {
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        self.find_sorted(self.notices(), doc! { "school": school }, options)
            .await
    }

    async fn list_media_by_admin(&self, admin: ObjectId) -> Result<Vec<MediaItem>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(10)
            .build();
        self.find_sorted(self.media(), doc! { "adminId": admin }, options)
            .await
    }

    async fn list_payments_by_student(&self, school_id: &str) -> Result<Vec<Payment>, AppError> {
        let options = FindOptions::builder().sort(doc! { "date": -1 }).build();
        self.find_sorted(self.payments(), doc! { "student": school_id }, options)
            .await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
