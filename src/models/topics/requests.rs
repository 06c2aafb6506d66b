use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/topic.ts")]
pub struct CreateTopicRequest {
    pub class_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}
