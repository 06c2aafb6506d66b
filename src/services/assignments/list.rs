use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::responses::{
    StudentAssignmentResponse, TeacherAssignmentResponse,
};
use crate::models::users::entities::UserRole;
use crate::services::current_user;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: String,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);

    let assignments = storage.list_assignments_by_class(&class_id).await?;
    let ids: Vec<String> = assignments.iter().map(|a| a.id.clone()).collect();

    match user.role {
        UserRole::Teacher => {
            let counts = storage.count_submissions(&ids).await?;
            let response: Vec<TeacherAssignmentResponse> = assignments
                .into_iter()
                .map(|assignment| {
                    let submission_count = counts.get(&assignment.id).copied().unwrap_or(0);
                    TeacherAssignmentResponse {
                        assignment,
                        submission_count,
                    }
                })
                .collect();
            Ok(HttpResponse::Ok().json(response))
        }
        UserRole::Student => {
            let own: HashMap<String, _> = storage
                .list_student_submissions(&user.id, &ids)
                .await?
                .into_iter()
                .map(|s| (s.assignment_id.clone(), s))
                .collect();
            let now = chrono::Utc::now();
            let response: Vec<StudentAssignmentResponse> = assignments
                .into_iter()
                .map(|assignment| {
                    let submission = own.get(&assignment.id);
                    StudentAssignmentResponse::new(assignment, submission, now)
                })
                .collect();
            Ok(HttpResponse::Ok().json(response))
        }
    }
}
