use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_owner;
use crate::services::current_user;

pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let assignment = storage
        .get_assignment_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    require_class_owner(storage.as_ref(), &assignment.class_id, &user).await?;

    let submissions = storage.list_submissions_by_assignment(&assignment.id).await?;
    Ok(HttpResponse::Ok().json(submissions))
}
