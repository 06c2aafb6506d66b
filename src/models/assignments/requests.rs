use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

// 作业通过 multipart 提交：classId, topicId, title, description?, dueDate, attachments[]
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub class_id: String,
    pub topic_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub created_by: String,
}

// 批改请求，grade 接受整数、整数值浮点或数字字符串
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct GradeRequest {
    #[ts(type = "number | string | null")]
    pub grade: Option<serde_json::Value>,
    pub feedback: Option<String>,
}

/// 解析分数，返回 None 表示不是 0-100 的整数
pub fn parse_grade(value: &serde_json::Value) -> Option<i32> {
    let number = match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i as f64
            } else {
                n.as_f64()?
            }
        }
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !number.is_finite() || number.fract() != 0.0 || !(0.0..=100.0).contains(&number) {
        return None;
    }
    Some(number as i32)
}
