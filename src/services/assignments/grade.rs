use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::{GradeRequest, parse_grade};
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_owner;
use crate::services::current_user;
use crate::services::notifications::{NotificationKind, notify_user};
use crate::utils::validate::non_empty;

pub async fn grade_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    submission_id: String,
    grade_request: GradeRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let submission = storage
        .get_submission_by_id(&submission_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::SubmissionNotFound, "Submission not found"))?;

    let assignment = storage
        .get_assignment_by_id(&submission.assignment_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    require_class_owner(storage.as_ref(), &assignment.class_id, &user).await?;

    let grade = match grade_request.grade {
        None | Some(serde_json::Value::Null) => {
            return Err(ApiError::missing_fields("Grade is required").into());
        }
        Some(value) => parse_grade(&value).ok_or_else(|| {
            ApiError::new(
                ErrorCode::InvalidGrade,
                "Grade must be an integer between 0 and 100",
            )
        })?,
    };

    let graded = storage
        .grade_submission(&submission.id, grade, non_empty(grade_request.feedback))
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::SubmissionNotFound, "Submission not found"))?;

    info!(
        "Submission {} graded {} by teacher {}",
        graded.id, grade, user.id
    );
    notify_user(NotificationKind::Grade, &graded.student_id, &assignment.title);

    Ok(HttpResponse::Ok().json(graded))
}
