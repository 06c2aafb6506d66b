use serde::Serialize;
use ts_rs::TS;

// 班级学生列表项
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrolledStudent {
    pub enrollment_id: String,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
