// 资料通过 multipart 提交：topicId, title, description?, attachments[]
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub topic_id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_by: String,
}
