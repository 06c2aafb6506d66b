use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnnouncementService;
use crate::models::{ApiError, ErrorCode, MessageResponse};
use crate::services::access::is_teacher_of;
use crate::services::{current_user, get_file_storage};

pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let announcement = storage
        .get_announcement_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Announcement not found"))?;

    // 作者或班级任课教师可删除
    let allowed = announcement.author_id == user.id
        || is_teacher_of(storage.as_ref(), &announcement.class_id, &user.id).await?;
    if !allowed {
        return Err(ApiError::new(
            ErrorCode::AccessDenied,
            "Only the author or the class teacher can delete this announcement",
        )
        .into());
    }

    let stored_names = storage
        .delete_announcement(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Announcement not found"))?;

    // 记录已删除，磁盘文件尽力清理
    get_file_storage(request).delete_all(&stored_names).await;

    info!(
        "Announcement {} deleted by {} ({} file(s) removed)",
        id,
        user.id,
        stored_names.len()
    );
    Ok(HttpResponse::Ok().json(MessageResponse::new("Announcement deleted")))
}
