use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::errors::ClassConnectError;
use crate::models::auth::{requests::RegisterRequest, responses::AuthResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiError, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{non_empty, validate_email};

pub async fn handle_register(
    service: &AuthService,
    request: &HttpRequest,
    register_request: RegisterRequest,
) -> ActixResult<HttpResponse> {
    let (Some(name), Some(email), Some(password), Some(role)) = (
        non_empty(register_request.name),
        non_empty(register_request.email),
        register_request.password.filter(|p| !p.is_empty()),
        non_empty(register_request.role),
    ) else {
        return Err(ApiError::missing_fields("Name, email, password and role are required").into());
    };

    let role = role.parse::<UserRole>().map_err(|_| {
        ApiError::new(ErrorCode::InvalidRole, "Role must be 'teacher' or 'student'")
    })?;

    let email = email.to_lowercase();
    if let Err(msg) = validate_email(&email) {
        return Err(ApiError::new(ErrorCode::InvalidEmail, msg).into());
    }

    let storage = service.get_storage(request);

    if storage.get_user_by_email(&email).await?.is_some() {
        return Err(ApiError::new(ErrorCode::UserExists, "A user with this email already exists").into());
    }

    let password_hash = hash_password(&password)?;

    let user = match storage.create_user(&name, &email, &password_hash, role).await {
        Ok(user) => user,
        // 并发注册同一邮箱时由唯一索引兜底
        Err(ClassConnectError::Conflict(_)) => {
            return Err(
                ApiError::new(ErrorCode::UserExists, "A user with this email already exists").into(),
            );
        }
        Err(e) => return Err(e.into()),
    };

    let token = service.get_jwt(request).generate_token(&user).map_err(|e| {
        error!("Failed to generate JWT token: {}", e);
        ApiError::new(ErrorCode::ServerError, "Internal server error")
    })?;

    info!("User {} registered as {}", user.id, user.role);
    Ok(HttpResponse::Created().json(AuthResponse { token, user }))
}
