use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: String,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: Option<String>,
    // 邀请码（6 位大写字母数字）
    pub class_code: String,
    // 所属专业
    pub career_id: String,
    // 学期
    pub semester: String,
    // 任课教师ID
    pub teacher_id: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
