use serde::Serialize;
use ts_rs::TS;

use crate::models::files::entities::Attachment;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: String,
    pub topic_id: String,
    pub topic_name: Option<String>,
    pub class_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub attachments: Vec<Attachment>,
}
