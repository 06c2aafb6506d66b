use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, AssignmentStatus, Submission};

// 教师视图：附带提交数量
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct TeacherAssignmentResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub submission_count: i64,
}

// 学生视图：附带本人的提交状态与成绩
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentAssignmentResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub class_name: Option<String>,
    pub status: AssignmentStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    // 仅详情接口返回
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub submission: Option<Submission>,
}

impl StudentAssignmentResponse {
    pub fn new(
        assignment: Assignment,
        own: Option<&Submission>,
        now: DateTime<Utc>,
    ) -> Self {
        let status = AssignmentStatus::derive(own.is_some(), assignment.due_date, now);
        Self {
            assignment,
            class_name: None,
            status,
            submitted_at: own.map(|s| s.submitted_at),
            grade: own.and_then(|s| s.grade),
            feedback: own.and_then(|s| s.feedback.clone()),
            submission: None,
        }
    }
}
