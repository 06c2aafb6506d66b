use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::users::entities::UserRole;
use crate::services::current_user;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let classes = match user.role {
        UserRole::Teacher => storage.list_classes_for_teacher(&user.id).await?,
        UserRole::Student => storage.list_classes_for_student(&user.id).await?,
    };

    Ok(HttpResponse::Ok().json(classes))
}
