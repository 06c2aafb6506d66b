use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;

pub async fn list_class_students(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let students = service
        .get_storage(request)
        .list_class_students(&class_id)
        .await?;

    Ok(HttpResponse::Ok().json(students))
}
