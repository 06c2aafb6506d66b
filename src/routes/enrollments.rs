use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{CreateEnrollmentRequest, StudentSearchQuery};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeClassId, SafeStudentId};

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn search_students(
    req: HttpRequest,
    query: web::Query<StudentSearchQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .search_students(&req, query.into_inner())
        .await
}

pub async fn list_class_students(
    req: HttpRequest,
    class_id: SafeClassId,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_class_students(&req, class_id.0)
        .await
}

pub async fn enroll_student(
    req: HttpRequest,
    enrollment_data: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_student(&req, enrollment_data.into_inner())
        .await
}

pub async fn unenroll_student(
    req: HttpRequest,
    class_id: SafeClassId,
    student_id: SafeStudentId,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .unenroll_student(&req, class_id.0, student_id.0)
        .await
}

pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                // 仅教师可检索学生
                web::resource("/search").route(
                    web::get()
                        .to(search_students)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/class/{class_id}").route(
                    web::get()
                        .to(list_class_students)
                        .wrap(middlewares::RequireClassAccess::owner()),
                ),
            )
            .service(
                web::resource("").route(
                    web::post()
                        .to(enroll_student)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{class_id}/{student_id}").route(
                    web::delete()
                        .to(unenroll_student)
                        .wrap(middlewares::RequireClassAccess::owner()),
                ),
            ),
    );
}
