use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::is_enrolled_in;
use crate::services::{current_user, get_file_storage};
use crate::utils::multipart::collect_form;

pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    id: String,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let assignment = storage
        .get_assignment_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::AssignmentNotFound, "Assignment not found"))?;

    if !is_enrolled_in(storage.as_ref(), &assignment.class_id, &user.id).await? {
        return Err(ApiError::new(
            ErrorCode::AccessDenied,
            "You are not enrolled in this class",
        )
        .into());
    }

    if chrono::Utc::now() > assignment.due_date {
        return Err(ApiError::new(
            ErrorCode::DueDatePassed,
            "The due date for this assignment has passed",
        )
        .into());
    }

    let files = get_file_storage(request);
    let form = collect_form(payload, "files", files.max_files(), files.max_size()).await?;

    let comment = form.text("comment");
    if comment.is_none() && form.files.is_empty() {
        return Err(ApiError::missing_fields("A comment or at least one file is required").into());
    }

    let staged = files.store_all(form.files).await?;

    let result = storage
        .upsert_submission(&assignment.id, &user.id, comment, staged.files())
        .await?;
    staged.persist();

    // 重新提交时替换掉的旧文件
    files.delete_all(&result.replaced_files).await;

    info!(
        "Student {} submitted assignment {} with {} file(s)",
        user.id,
        assignment.id,
        result.submission.files.len()
    );
    Ok(HttpResponse::Created().json(result.submission))
}
