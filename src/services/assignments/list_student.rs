use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::responses::StudentAssignmentResponse;
use crate::services::current_user;

pub async fn list_student_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let assignments = storage.list_assignments_for_student(&user.id).await?;
    let ids: Vec<String> = assignments.iter().map(|(a, _)| a.id.clone()).collect();

    let own: HashMap<String, _> = storage
        .list_student_submissions(&user.id, &ids)
        .await?
        .into_iter()
        .map(|s| (s.assignment_id.clone(), s))
        .collect();

    let now = chrono::Utc::now();
    let response: Vec<StudentAssignmentResponse> = assignments
        .into_iter()
        .map(|(assignment, class_name)| {
            let submission = own.get(&assignment.id);
            let mut item = StudentAssignmentResponse::new(assignment, submission, now);
            item.class_name = class_name;
            item
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}
