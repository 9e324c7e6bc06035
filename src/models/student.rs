//! Student record with embedded attendance and exam results.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Student document as stored in the `students` collection.
///
/// `school_id` is the external identifier students log in with; `_id` is the
/// storage key other collections reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub school_id: String,
    pub name: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub parent_phone: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub school: Option<ObjectId>,
    /// Class reference (historical field name from the source schema).
    #[serde(default, rename = "sclassName")]
    pub sclass: Option<ObjectId>,
    #[serde(default, rename = "examResult")]
    pub exam_results: Vec<ExamResult>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// Anything else found in the data; counted as not-present.
    #[serde(other)]
    Other,
}

/// One embedded attendance entry on a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(default, rename = "subName")]
    pub subject: Option<ObjectId>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// One embedded exam result; `subject` references the `subjects` collection
/// and may dangle if the subject was deleted after the marks were entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    #[serde(rename = "subName")]
    pub subject: ObjectId,
    pub marks_obtained: MarksObtained,
}

/// Fixed mark components of an exam result, all non-negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksObtained {
    #[serde(default)]
    pub beginning: f64,
    #[serde(default)]
    pub mid_term: f64,
    #[serde(default)]
    pub end_term: f64,
    #[serde(default)]
    pub weekend_work: f64,
    #[serde(default)]
    pub holiday_package: f64,
}

/// Client-updatable student fields for `PUT /api/student/{studentId}`.
///
/// `_id`, `schoolId` and `school` are deliberately absent: identity and
/// school scope are never writable through this endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub parent_phone: Option<String>,
    pub photo: Option<String>,
}

impl UpdateStudent {
    /// Build the `$set` document, skipping fields the client did not send.
    pub fn to_set_document(&self) -> bson::Document {
        let mut doc = bson::Document::new();
        let fields: [(&str, &Option<String>); 11] = [
            ("name", &self.name),
            ("dob", &self.dob),
            ("gender", &self.gender),
            ("bloodGroup", &self.blood_group),
            ("address", &self.address),
            ("phone", &self.phone),
            ("email", &self.email),
            ("fatherName", &self.father_name),
            ("motherName", &self.mother_name),
            ("parentPhone", &self.parent_phone),
            ("photo", &self.photo),
        ];
        for (key, value) in fields {
            if let Some(v) = value {
                doc.insert(key, v.clone());
            }
        }
        doc
    }
}

/// Attendance entry as returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordView {
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl From<&AttendanceRecord> for AttendanceRecordView {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.date,
            status: r.status,
            subject: r.subject.map(|id| id.to_hex()),
            remarks: r.remarks.clone(),
        }
    }
}
