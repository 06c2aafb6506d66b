/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过后把令牌中的身份
 * （[`AuthUser`]）写入请求扩展，供后续中间件和处理程序使用。
 *
 * ```rust,ignore
 * web::scope("/api/classes")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_classes))
 * ```
 *
 * ## 认证流程
 *
 * 1. 缺少请求头或不是 Bearer 方案：401 UNAUTHORIZED
 * 2. 令牌格式错误、签名错误、已过期或角色未知：401 INVALID_TOKEN
 * 3. 按令牌中的 ID 查询用户，仅作提示：查询失败或用户不存在时记录警告并放行
 * 4. OPTIONS 预检请求直接放行
 */

use crate::models::ErrorCode;
use crate::models::auth::entities::AuthUser;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;
use crate::utils::jwt::JwtService;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

// 提取并验证令牌
fn authenticate(req: &ServiceRequest) -> Result<AuthUser, (ErrorCode, &'static str)> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or((ErrorCode::Unauthorized, "Authentication required"))?;

    let jwt = req
        .app_data::<web::Data<JwtService>>()
        .expect("JwtService not found in app data");

    let claims = jwt.verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        (ErrorCode::InvalidToken, "Invalid or expired token")
    })?;

    let role = claims.role.parse::<UserRole>().map_err(|_| {
        info!("JWT token carries unknown role: {}", claims.role);
        (ErrorCode::InvalidToken, "Invalid or expired token")
    })?;

    Ok(AuthUser {
        id: claims.id,
        name: claims.name,
        email: claims.email,
        role,
    })
}

// 提示性的用户存在检查，任何失败都只记录日志
async fn advisory_user_check(req: &ServiceRequest, user: &AuthUser) {
    let Some(storage) = req.app_data::<web::Data<Arc<dyn Storage>>>() else {
        return;
    };
    match storage.get_user_by_id(&user.id).await {
        Ok(Some(_)) => {}
        Ok(None) => warn!("Token user {} no longer exists, proceeding", user.id),
        Err(e) => warn!("User lookup failed for {}: {}, proceeding", user.id, e),
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    HttpResponse::NoContent().finish().map_into_right_body(),
                ));
            }

            match authenticate(&req) {
                Ok(user) => {
                    advisory_user_check(&req, &user).await;
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err((code, message)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        code
                    );
                    Ok(req.into_response(
                        create_error_response(code, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<AuthUser> {
        req.extensions().get::<AuthUser>().cloned()
    }
}
