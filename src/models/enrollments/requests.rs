use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub class_id: Option<String>,
    pub student_id: Option<String>,
}

// 学生检索参数
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct StudentSearchQuery {
    pub query: Option<String>,
    // 指定后排除已在该班级的学生
    pub class_id: Option<String>,
}
