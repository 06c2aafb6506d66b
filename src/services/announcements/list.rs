use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnnouncementService;

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let announcements = service
        .get_storage(request)
        .list_announcements_by_class(&class_id)
        .await?;

    Ok(HttpResponse::Ok().json(announcements))
}
