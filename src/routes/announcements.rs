use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::AnnouncementService;
use crate::utils::{SafeClassId, SafeId};

static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

pub async fn list_announcements(
    req: HttpRequest,
    class_id: SafeClassId,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .list_announcements(&req, class_id.0)
        .await
}

pub async fn get_announcement(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.get_announcement(&req, id.0).await
}

pub async fn create_announcement(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .create_announcement(&req, payload)
        .await
}

pub async fn delete_announcement(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.delete_announcement(&req, id.0).await
}

pub fn configure_announcements_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/announcements")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/class/{class_id}").route(
                    web::get()
                        .to(list_announcements)
                        .wrap(middlewares::RequireClassAccess::member()),
                ),
            )
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_announcement)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_announcement))
                    .route(
                        // 作者或任课教师
                        web::delete()
                            .to(delete_announcement)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );
}
