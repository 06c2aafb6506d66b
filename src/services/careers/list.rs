use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CareerService;

pub async fn list_careers(
    service: &CareerService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let careers = service.get_storage(request).list_careers().await?;
    Ok(HttpResponse::Ok().json(careers))
}
