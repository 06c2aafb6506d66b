use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiError, ErrorCode, MessageResponse};

pub async fn unenroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: String,
    student_id: String,
) -> ActixResult<HttpResponse> {
    let removed = service
        .get_storage(request)
        .delete_enrollment(&class_id, &student_id)
        .await?;

    if !removed {
        return Err(ApiError::new(
            ErrorCode::NotFound,
            "Student is not enrolled in this class",
        )
        .into());
    }

    info!("Student {} removed from class {}", student_id, class_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Student removed from class")))
}
