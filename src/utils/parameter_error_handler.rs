use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest};
use tracing::debug;

use crate::models::{ApiError, ErrorCode};

// 请求体无法解析时统一返回 MISSING_FIELDS
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid JSON body for {}: {}", req.path(), err);
    ApiError::new(ErrorCode::MissingFields, format!("Invalid request body: {err}")).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid query string for {}: {}", req.path(), err);
    ApiError::new(
        ErrorCode::MissingFields,
        format!("Invalid query parameters: {err}"),
    )
    .into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    debug!("Invalid path for {}: {}", req.path(), err);
    ApiError::new(ErrorCode::MissingFields, format!("Invalid path: {err}")).into()
}
