use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AnnouncementService;
use crate::models::ApiError;
use crate::models::announcements::requests::NewAnnouncement;
use crate::services::access::require_class_owner;
use crate::services::notifications::{NotificationKind, notify_class};
use crate::services::{current_user, get_file_storage};
use crate::utils::multipart::collect_form;

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let files = get_file_storage(request);

    let form = collect_form(payload, "attachments", files.max_files(), files.max_size()).await?;

    let Some(class_id) = form.text("classId") else {
        return Err(ApiError::missing_fields("classId, title and content are required").into());
    };

    let storage = service.get_storage(request);
    require_class_owner(storage.as_ref(), &class_id, &user).await?;

    let (Some(title), Some(content)) = (form.text("title"), form.text("content")) else {
        return Err(ApiError::missing_fields("classId, title and content are required").into());
    };

    let staged = files.store_all(form.files).await?;

    let announcement = storage
        .create_announcement(
            NewAnnouncement {
                class_id: class_id.clone(),
                title,
                content,
                author_id: user.id.clone(),
            },
            staged.files(),
        )
        .await?;
    staged.persist();

    info!(
        "Announcement {} with {} attachment(s) created in class {}",
        announcement.id,
        announcement.attachments.len(),
        class_id
    );
    notify_class(
        NotificationKind::Announcement,
        &class_id,
        &announcement.title,
    );

    Ok(HttpResponse::Created().json(announcement))
}
