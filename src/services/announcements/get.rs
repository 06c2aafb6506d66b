use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_member;
use crate::services::current_user;

pub async fn get_announcement(
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

    require_class_member(storage.as_ref(), &announcement.class_id, &user).await?;

    Ok(HttpResponse::Ok().json(announcement))
}
