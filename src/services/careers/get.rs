use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CareerService;
use crate::models::{ApiError, ErrorCode};

pub async fn get_career(
    service: &CareerService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let career = service
        .get_storage(request)
        .get_career_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Career not found"))?;

    Ok(HttpResponse::Ok().json(career))
}
