//! Report card record with per-subject assessment entries.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Draft,
    Published,
}

/// Report card document from the `reportcards` collection.
///
/// Only `Published` cards ever reach the student-facing API; the store
/// filters on status so drafts stay invisible end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub student: ObjectId,
    #[serde(default)]
    pub sclass: Option<ObjectId>,
    #[serde(default)]
    pub subjects: Vec<SubjectReport>,
    pub term: String,
    pub academic_year: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub overall_grade: Option<String>,
    #[serde(default)]
    pub average_percentage: Option<f64>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// One per-subject row on a report card. Subject and teacher are weak
/// references, resolved independently of each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReport {
    #[serde(default)]
    pub subject: Option<ObjectId>,
    #[serde(default)]
    pub teacher: Option<ObjectId>,
    #[serde(default)]
    pub assessments: Assessments,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Named assessment scores; the short keys are the stored field names
/// (beginning/mid/holiday-package/weekend-work/end of term).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assessments {
    #[serde(default, rename = "BOT", skip_serializing_if = "Option::is_none")]
    pub bot: Option<f64>,
    #[serde(default, rename = "MID", skip_serializing_if = "Option::is_none")]
    pub mid: Option<f64>,
    #[serde(default, rename = "HP", skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, rename = "WW", skip_serializing_if = "Option::is_none")]
    pub ww: Option<f64>,
    #[serde(default, rename = "EOT", skip_serializing_if = "Option::is_none")]
    pub eot: Option<f64>,
}
