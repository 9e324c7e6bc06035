//! Secretary record.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secretary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub secretary_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub school: Option<ObjectId>,
}
