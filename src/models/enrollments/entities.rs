use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: String,
    pub class_id: String,
    pub student_id: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
