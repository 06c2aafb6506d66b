use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 附件（公告、作业、资料、提交共用的结构）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct Attachment {
    pub id: String,
    // 原始文件名
    pub file_name: String,
    // 磁盘上的存储名
    pub file_path: String,
    // 可访问的 URL，形如 /uploads/<storedName>
    pub file_url: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // MIME 类型
    pub file_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// 已写入磁盘、尚未入库的文件
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub original_name: String,
    pub stored_name: String,
    pub url: String,
    pub size: i64,
    pub mime_type: String,
}
