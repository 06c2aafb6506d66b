use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub career_id: Option<String>,
    pub semester: Option<String>,
}

// 存储层使用的已校验数据
#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub description: Option<String>,
    pub career_id: String,
    pub semester: String,
    pub teacher_id: String,
}
