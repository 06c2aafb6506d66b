use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MaterialService;
use crate::models::materials::requests::NewMaterial;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_owner;
use crate::services::notifications::{NotificationKind, notify_class};
use crate::services::{current_user, get_file_storage};
use crate::utils::multipart::collect_form;

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let files = get_file_storage(request);

    let form = collect_form(payload, "attachments", files.max_files(), files.max_size()).await?;

    let Some(topic_id) = form.text("topicId") else {
        return Err(ApiError::missing_fields("topicId and title are required").into());
    };

    let storage = service.get_storage(request);
    let topic = storage
        .get_topic_by_id(&topic_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::TopicNotFound, "Topic not found"))?;

    require_class_owner(storage.as_ref(), &topic.class_id, &user).await?;

    let Some(title) = form.text("title") else {
        return Err(ApiError::missing_fields("topicId and title are required").into());
    };

    let description = form.text("description");
    let staged = files.store_all(form.files).await?;

    let material = storage
        .create_material(
            NewMaterial {
                topic_id: topic.id.clone(),
                title,
                description,
                created_by: user.id.clone(),
            },
            staged.files(),
        )
        .await?;
    staged.persist();

    info!(
        "Material {} created under topic {} in class {}",
        material.id, topic.id, topic.class_id
    );
    notify_class(NotificationKind::Material, &topic.class_id, &material.title);

    Ok(HttpResponse::Created().json(material))
}
