//! School record, stored in the `admins` collection: one admin account per
//! school, carrying the access code used for admin login.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub school_name: String,
    /// Admin login credential; never serialized into API responses.
    #[serde(default)]
    pub access_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// School info embedded in the student dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    pub id: String,
    pub school_name: String,
}

impl From<&School> for SchoolInfo {
    fn from(s: &School) -> Self {
        Self {
            id: s.id.to_hex(),
            school_name: s.school_name.clone(),
        }
    }
}
