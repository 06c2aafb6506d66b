use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::auth::{requests::LoginRequest, responses::AuthResponse};
use crate::models::{ApiError, ErrorCode};
use crate::utils::password::verify_password;
use crate::utils::validate::non_empty;

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let (Some(email), Some(password)) = (
        non_empty(login_request.email),
        login_request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::missing_fields("Email and password are required").into());
    };

    let storage = service.get_storage(request);

    // 邮箱不存在与密码错误返回同一错误
    let user = match storage.get_user_by_email(&email.to_lowercase()).await? {
        Some(user) if verify_password(&password, &user.password_hash) => user,
        _ => {
            return Err(
                ApiError::new(ErrorCode::InvalidCredentials, "Invalid email or password").into(),
            );
        }
    };

    let token = service.get_jwt(request).generate_token(&user).map_err(|e| {
        error!("Failed to generate JWT token: {}", e);
        ApiError::new(ErrorCode::ServerError, "Internal server error")
    })?;

    info!("User {} logged in successfully", user.id);
    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}
