use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let materials = service
        .get_storage(request)
        .list_materials_by_class(&class_id)
        .await?;

    Ok(HttpResponse::Ok().json(materials))
}
