use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TopicService;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_member;
use crate::services::current_user;

pub async fn get_topic(
    service: &TopicService,
    request: &HttpRequest,
    topic_id: String,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let topic = storage
        .get_topic_by_id(&topic_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::TopicNotFound, "Topic not found"))?;

    require_class_member(storage.as_ref(), &topic.class_id, &user).await?;

    Ok(HttpResponse::Ok().json(topic))
}
