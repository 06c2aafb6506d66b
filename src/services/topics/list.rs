use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TopicService;

pub async fn list_topics(
    service: &TopicService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let topics = service
        .get_storage(request)
        .list_topics_by_class(&class_id)
        .await?;

    Ok(HttpResponse::Ok().json(topics))
}
