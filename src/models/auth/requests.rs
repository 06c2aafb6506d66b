use serde::Deserialize;
use ts_rs::TS;

// 注册请求，字段缺失统一在服务层返回 MISSING_FIELDS
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// teacher 或 student
    pub role: Option<String>,
}

// 用户登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}
