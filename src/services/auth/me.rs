use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::auth::responses::UserInfoResponse;
use crate::models::{ApiError, ErrorCode};
use crate::services::current_user;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let auth = current_user(request)?;
    let storage = service.get_storage(request);

    let user = storage
        .get_user_by_id(&auth.id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "User not found"))?;

    Ok(HttpResponse::Ok().json(UserInfoResponse { user }))
}
