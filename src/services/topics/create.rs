use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TopicService;
use crate::models::ApiError;
use crate::models::topics::requests::CreateTopicRequest;
use crate::services::access::require_class_owner;
use crate::services::current_user;
use crate::utils::validate::non_empty;

pub async fn create_topic(
    service: &TopicService,
    request: &HttpRequest,
    topic_data: CreateTopicRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    let Some(class_id) = non_empty(topic_data.class_id) else {
        return Err(ApiError::missing_fields("classId and name are required").into());
    };

    let storage = service.get_storage(request);
    require_class_owner(storage.as_ref(), &class_id, &user).await?;

    let Some(name) = non_empty(topic_data.name) else {
        return Err(ApiError::missing_fields("classId and name are required").into());
    };

    let topic = storage
        .create_topic(&class_id, &name, non_empty(topic_data.description))
        .await?;

    info!(
        "Topic {} (#{}) created in class {}",
        topic.id, topic.order_index, class_id
    );
    Ok(HttpResponse::Created().json(topic))
}
