//! Teacher record.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub teacher_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub school: Option<ObjectId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherView {
    pub id: String,
    pub teacher_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&Teacher> for TeacherView {
    fn from(t: &Teacher) -> Self {
        Self {
            id: t.id.to_hex(),
            teacher_id: t.teacher_id.clone(),
            name: t.name.clone(),
            email: t.email.clone(),
        }
    }
}
