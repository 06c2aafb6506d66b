use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::CareerService;
use crate::utils::SafeId;

static CAREER_SERVICE: Lazy<CareerService> = Lazy::new(CareerService::new_lazy);

pub async fn list_careers(req: HttpRequest) -> ActixResult<HttpResponse> {
    CAREER_SERVICE.list_careers(&req).await
}

pub async fn get_career(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    CAREER_SERVICE.get_career(&req, id.0).await
}

pub fn configure_careers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/careers")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_careers))
            .route("/{id}", web::get().to(get_career)),
    );
}
