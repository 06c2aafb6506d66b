use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::{SafeClassId, SafeId};

static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn list_materials(req: HttpRequest, class_id: SafeClassId) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(&req, class_id.0).await
}

pub async fn get_material(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, id.0).await
}

pub async fn create_material(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.create_material(&req, payload).await
}

pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/class/{class_id}").route(
                    web::get()
                        .to(list_materials)
                        .wrap(middlewares::RequireClassAccess::member()),
                ),
            )
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_material)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .route("/{id}", web::get().to(get_material)),
    );
}
