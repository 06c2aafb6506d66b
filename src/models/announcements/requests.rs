// 公告通过 multipart 提交：classId, title, content, attachments[]
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub class_id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
}
