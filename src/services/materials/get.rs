use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_member;
use crate::services::current_user;

pub async fn get_material(
    service: &MaterialService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let material = storage
        .get_material_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Material not found"))?;

    // 主题被删除时 class_id 为空，此时无法判定归属
    let class_id = material
        .class_id
        .clone()
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Material not found"))?;
    require_class_member(storage.as_ref(), &class_id, &user).await?;

    Ok(HttpResponse::Ok().json(material))
}
