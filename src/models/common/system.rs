use serde::Serialize;
use ts_rs::TS;

/// 进程启动时间，用于计算运行时长
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 健康检查响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    // 运行时长（秒）
    pub uptime: i64,
}
