use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/career.ts")]
pub struct Career {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}
