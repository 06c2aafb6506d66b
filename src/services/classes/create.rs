use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::{CreateClassRequest, NewClass};
use crate::models::classes::responses::ClassResponse;
use crate::models::{ApiError, ErrorCode};
use crate::services::current_user;
use crate::utils::validate::non_empty;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    let (Some(name), Some(career_id), Some(semester)) = (
        non_empty(class_data.name),
        non_empty(class_data.career_id),
        non_empty(class_data.semester),
    ) else {
        return Err(ApiError::missing_fields("Name, careerId and semester are required").into());
    };

    let storage = service.get_storage(request);

    let career = storage
        .get_career_by_id(&career_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Career not found"))?;

    let class = storage
        .create_class(NewClass {
            name,
            description: non_empty(class_data.description),
            career_id,
            semester,
            teacher_id: user.id.clone(),
        })
        .await?;

    info!(
        "Class {} ({}) created by teacher {}",
        class.id, class.class_code, user.id
    );

    Ok(HttpResponse::Created().json(ClassResponse {
        class,
        career_name: Some(career.name),
        teacher_name: Some(user.name),
        student_count: 0,
    }))
}
