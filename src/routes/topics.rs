use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::topics::requests::CreateTopicRequest;
use crate::models::users::entities::UserRole;
use crate::services::TopicService;
use crate::utils::{SafeClassId, SafeId};

static TOPIC_SERVICE: Lazy<TopicService> = Lazy::new(TopicService::new_lazy);

pub async fn list_topics(req: HttpRequest, class_id: SafeClassId) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.list_topics(&req, class_id.0).await
}

pub async fn create_topic(
    req: HttpRequest,
    topic_data: web::Json<CreateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE
        .create_topic(&req, topic_data.into_inner())
        .await
}

pub async fn get_topic(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.get_topic(&req, id.0).await
}

pub fn configure_topics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/topics")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/class/{class_id}").route(
                    web::get()
                        .to(list_topics)
                        .wrap(middlewares::RequireClassAccess::member()),
                ),
            )
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_topic)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .route("/{id}", web::get().to(get_topic)),
    );
}
