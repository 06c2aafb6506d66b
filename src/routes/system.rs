use actix_files::Files;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use std::path::Path;

use crate::services::HealthService;
use crate::services::files::UPLOADS_URL_PREFIX;

static HEALTH_SERVICE: Lazy<HealthService> = Lazy::new(HealthService::new_lazy);

pub async fn health(req: HttpRequest) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.health(&req).await
}

// 健康检查，无需认证
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health));
}

/// 上传文件的静态访问，无需认证
pub fn configure_upload_routes(cfg: &mut web::ServiceConfig, dir: &Path) {
    cfg.service(Files::new(UPLOADS_URL_PREFIX, dir));
}
