/*!
 * 班级访问控制中间件
 *
 * 必须在 RequireJWT 之后使用，且只能挂在路径带 `{class_id}` 的路由上。
 * 通过后把 [`Class`] 写入请求扩展。
 *
 * ```rust,ignore
 * web::resource("/class/{class_id}")
 *     .route(web::get().to(list_topics).wrap(RequireClassAccess::member()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::info;

use crate::models::{ErrorCode, auth::entities::AuthUser, classes::entities::Class};
use crate::services::access::{ClassRule, require_class};
use crate::storage::Storage;

use super::create_error_response;

#[derive(Clone)]
pub struct RequireClassAccess {
    rule: ClassRule,
}

impl RequireClassAccess {
    /// 任课教师或已选课学生
    pub fn member() -> Self {
        Self {
            rule: ClassRule::Member,
        }
    }

    /// 仅任课教师
    pub fn owner() -> Self {
        Self {
            rule: ClassRule::Owner,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireClassAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireClassAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireClassAccessMiddleware {
            service: Rc::new(service),
            rule: self.rule,
        }))
    }
}

pub struct RequireClassAccessMiddleware<S> {
    service: Rc<S>,
    rule: ClassRule,
}

impl<S, B> Service<ServiceRequest> for RequireClassAccessMiddleware<S>
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
        let rule = self.rule;

        Box::pin(async move {
            let Some(user) = req.extensions().get::<AuthUser>().cloned() else {
                info!(
                    "Class access check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(ErrorCode::Unauthorized, "Authentication required")
                        .map_into_right_body(),
                ));
            };

            let Some(class_id) = req.match_info().get("class_id").map(str::to_string) else {
                return Ok(req.into_response(
                    create_error_response(ErrorCode::MissingFields, "Missing class id")
                        .map_into_right_body(),
                ));
            };

            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone();

            match require_class(storage.as_ref(), &class_id, &user, rule).await {
                Ok(class) => {
                    req.extensions_mut().insert::<Class>(class);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!(
                        "Class access denied for user {} on class {}: {}",
                        user.id, class_id, err
                    );
                    Ok(req.into_response(err.error_response().map_into_right_body()))
                }
            }
        })
    }
}
