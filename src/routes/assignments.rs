use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::GradeRequest;
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeClassId, SafeId, SafeSubmissionId};

// 懒加载的全局 ASSIGNMENT_SERVICE 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    class_id: SafeClassId,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, class_id.0).await
}

pub async fn list_student_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_student_assignments(&req).await
}

pub async fn get_assignment(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, id.0).await
}

pub async fn create_assignment(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_assignment(&req, payload).await
}

pub async fn submit_assignment(
    req: HttpRequest,
    id: SafeId,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_assignment(&req, id.0, payload)
        .await
}

pub async fn list_submissions(req: HttpRequest, id: SafeId) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_submissions(&req, id.0).await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionId,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .grade_submission(&req, submission_id.0, grade_data.into_inner())
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/class/{class_id}").route(
                    web::get()
                        .to(list_assignments)
                        .wrap(middlewares::RequireClassAccess::member()),
                ),
            )
            .service(
                // 必须在 /{id} 之前注册
                web::resource("/student").route(
                    web::get()
                        .to(list_student_assignments)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_assignment)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(web::resource("/{id}").route(web::get().to(get_assignment)))
            .service(
                web::resource("/{id}/submit").route(
                    web::post()
                        .to(submit_assignment)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{id}/submissions").route(
                    web::get()
                        .to(list_submissions)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{submission_id}/grade").route(
                    web::post()
                        .to(grade_submission)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
