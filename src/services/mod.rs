pub mod access;
pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod careers;
pub mod classes;
pub mod enrollments;
pub mod files;
pub mod health;
pub mod materials;
pub mod notifications;
pub mod topics;

pub use announcements::AnnouncementService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use careers::CareerService;
pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use files::FileStorage;
pub use health::HealthService;
pub use materials::MaterialService;
pub use topics::TopicService;

use actix_web::{HttpRequest, web};

use crate::middlewares::RequireJWT;
use crate::models::auth::entities::AuthUser;
use crate::models::{ApiError, ErrorCode};

/// 当前登录用户，未经过 RequireJWT 时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<AuthUser, ApiError> {
    RequireJWT::extract_user(request)
        .ok_or_else(|| ApiError::new(ErrorCode::Unauthorized, "Authentication required"))
}

pub(crate) fn get_file_storage(request: &HttpRequest) -> &FileStorage {
    request
        .app_data::<web::Data<FileStorage>>()
        .expect("FileStorage not found in app data")
        .get_ref()
}
