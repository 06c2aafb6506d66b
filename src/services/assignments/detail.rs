use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::responses::{
    StudentAssignmentResponse, TeacherAssignmentResponse,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_member;
use crate::services::current_user;

pub async fn get_assignment(
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

    require_class_member(storage.as_ref(), &assignment.class_id, &user).await?;

    match user.role {
        UserRole::Teacher => {
            let counts = storage
                .count_submissions(std::slice::from_ref(&assignment.id))
                .await?;
            let submission_count = counts.get(&assignment.id).copied().unwrap_or(0);
            Ok(HttpResponse::Ok().json(TeacherAssignmentResponse {
                assignment,
                submission_count,
            }))
        }
        UserRole::Student => {
            let own = storage
                .list_student_submissions(&user.id, std::slice::from_ref(&assignment.id))
                .await?
                .pop();
            let mut response =
                StudentAssignmentResponse::new(assignment, own.as_ref(), chrono::Utc::now());
            response.submission = own;
            Ok(HttpResponse::Ok().json(response))
        }
    }
}
