use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::assignments::requests::NewAssignment;
use crate::models::{ApiError, ErrorCode};
use crate::services::access::require_class_owner;
use crate::services::notifications::{NotificationKind, notify_class};
use crate::services::{current_user, get_file_storage};
use crate::utils::multipart::collect_form;
use crate::utils::parse_due_date;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let files = get_file_storage(request);

    let form = collect_form(payload, "attachments", files.max_files(), files.max_size()).await?;

    let Some(class_id) = form.text("classId") else {
        return Err(ApiError::missing_fields(
            "classId, topicId, title and dueDate are required",
        )
        .into());
    };

    let storage = service.get_storage(request);
    require_class_owner(storage.as_ref(), &class_id, &user).await?;

    let (Some(topic_id), Some(title), Some(due_date)) =
        (form.text("topicId"), form.text("title"), form.text("dueDate"))
    else {
        return Err(ApiError::missing_fields(
            "classId, topicId, title and dueDate are required",
        )
        .into());
    };

    // 主题必须属于该班级
    match storage.get_topic_by_id(&topic_id).await? {
        Some(topic) if topic.class_id == class_id => {}
        _ => {
            return Err(ApiError::new(
                ErrorCode::TopicNotFound,
                "Topic not found in this class",
            )
            .into());
        }
    }

    let due_date = parse_due_date(&due_date)
        .filter(|due| *due > chrono::Utc::now())
        .ok_or_else(|| {
            ApiError::new(
                ErrorCode::InvalidDueDate,
                "Due date must be a valid date in the future",
            )
        })?;

    let description = form.text("description");
    let staged = files.store_all(form.files).await?;

    let assignment = storage
        .create_assignment(
            NewAssignment {
                class_id: class_id.clone(),
                topic_id,
                title,
                description,
                due_date,
                created_by: user.id.clone(),
            },
            staged.files(),
        )
        .await?;
    staged.persist();

    info!(
        "Assignment {} due {} created in class {}",
        assignment.id, assignment.due_date, class_id
    );
    notify_class(NotificationKind::Assignment, &class_id, &assignment.title);

    Ok(HttpResponse::Created().json(assignment))
}
