//! Subject record.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub sub_name: String,
    pub sub_code: String,
    #[serde(default)]
    pub sessions: Option<String>,
    #[serde(default)]
    pub teacher: Option<ObjectId>,
    #[serde(default)]
    pub school: Option<ObjectId>,
}

/// Subject as returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub id: String,
    pub sub_name: String,
    pub sub_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

impl From<&Subject> for SubjectView {
    fn from(s: &Subject) -> Self {
        Self {
            id: s.id.to_hex(),
            sub_name: s.sub_name.clone(),
            sub_code: s.sub_code.clone(),
            sessions: s.sessions.clone(),
            teacher: s.teacher.map(|id| id.to_hex()),
        }
    }
}
