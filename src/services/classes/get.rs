use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiError, ErrorCode};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let class = service
        .get_storage(request)
        .get_class_detail(&class_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Class not found"))?;

    Ok(HttpResponse::Ok().json(class))
}
