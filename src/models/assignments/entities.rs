use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::models::files::entities::Attachment;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: String,
    pub class_id: String,
    pub topic_id: String,
    pub topic_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
}

// 作业状态，读取时计算
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Expired,
}

impl AssignmentStatus {
    /// 已提交优先；未提交时按截止时间判断
    pub fn derive(has_submission: bool, due_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if has_submission {
            AssignmentStatus::Submitted
        } else if now > due_date {
            AssignmentStatus::Expired
        } else {
            AssignmentStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
    // 0-100，未批改为 null
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    pub files: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_submitted_wins_over_due_date() {
        let now = Utc::now();
        let past = now - Duration::hours(1);
        assert_eq!(
            AssignmentStatus::derive(true, past, now),
            AssignmentStatus::Submitted
        );
    }

    #[test]
    fn status_without_submission_depends_on_due_date() {
        let now = Utc::now();
        assert_eq!(
            AssignmentStatus::derive(false, now - Duration::seconds(1), now),
            AssignmentStatus::Expired
        );
        assert_eq!(
            AssignmentStatus::derive(false, now + Duration::days(1), now),
            AssignmentStatus::Pending
        );
        // 截止时刻本身仍可提交
        assert_eq!(
            AssignmentStatus::derive(false, now, now),
            AssignmentStatus::Pending
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(AssignmentStatus::Pending).unwrap(),
            "pending"
        );
    }
}
