use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, SEARCH_LIMIT};
use crate::models::enrollments::requests::StudentSearchQuery;
use crate::models::users::entities::UserSummary;
use crate::models::{ApiError, ErrorCode};
use crate::utils::validate::non_empty;

pub async fn search_students(
    service: &EnrollmentService,
    request: &HttpRequest,
    query: StudentSearchQuery,
) -> ActixResult<HttpResponse> {
    let Some(text) = non_empty(query.query) else {
        return Err(ApiError::new(ErrorCode::MissingQuery, "Search query is required").into());
    };
    let exclude_class_id = non_empty(query.class_id);

    let students: Vec<UserSummary> = service
        .get_storage(request)
        .search_students(&text, exclude_class_id.as_deref(), SEARCH_LIMIT)
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(students))
}
