use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::errors::ClassConnectError;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_owner;
use crate::services::current_user;
use crate::utils::validate::non_empty;

pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    enrollment_data: CreateEnrollmentRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    let (Some(class_id), Some(student_id)) = (
        non_empty(enrollment_data.class_id),
        non_empty(enrollment_data.student_id),
    ) else {
        return Err(ApiError::missing_fields("classId and studentId are required").into());
    };

    let storage = service.get_storage(request);
    require_class_owner(storage.as_ref(), &class_id, &user).await?;

    match storage.get_user_by_id(&student_id).await? {
        Some(student) if student.role == UserRole::Student => {}
        _ => {
            return Err(ApiError::new(ErrorCode::StudentNotFound, "Student not found").into());
        }
    }

    let already_enrolled = || {
        ApiError::new(
            ErrorCode::AlreadyEnrolled,
            "Student is already enrolled in this class",
        )
    };

    if storage.is_enrolled_in(&class_id, &student_id).await? {
        return Err(already_enrolled().into());
    }

    let enrollment = match storage.create_enrollment(&class_id, &student_id).await {
        Ok(enrollment) => enrollment,
        // 唯一索引是最终依据
        Err(ClassConnectError::Conflict(_)) => return Err(already_enrolled().into()),
        Err(e) => return Err(e.into()),
    };

    info!("Student {} enrolled in class {}", student_id, class_id);
    Ok(HttpResponse::Created().json(enrollment))
}
