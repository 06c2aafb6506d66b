use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/topic.ts")]
pub struct Topic {
    pub id: String,
    pub class_id: String,
    pub name: String,
    pub description: Option<String>,
    // 班级内递增，不回填空缺
    pub order_index: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
