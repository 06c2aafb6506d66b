use super::entities::Class;
use serde::Serialize;
use ts_rs::TS;

// 班级列表项 / 详情
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub class: Class,
    pub career_name: Option<String>,
    pub teacher_name: Option<String>,
    pub student_count: i64,
}
