//! School class record.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Class document from the `sclasses` collection. The `subjects` array is
/// ordered and defines the canonical subject order for every class view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub sclass_name: String,
    #[serde(default)]
    pub school: Option<ObjectId>,
    #[serde(default)]
    pub subjects: Vec<ObjectId>,
}

/// Listing entry for `GET /api/classes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: String,
    pub sclass_name: String,
    pub subjects_count: usize,
}

impl From<&SchoolClass> for ClassSummary {
    fn from(c: &SchoolClass) -> Self {
        Self {
            id: c.id.to_hex(),
            sclass_name: c.sclass_name.clone(),
            subjects_count: c.subjects.len(),
        }
    }
}
