use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use ts_rs::TS;

use crate::errors::ClassConnectError;
use crate::models::ErrorCode;

// 错误详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ErrorDetail {
    pub message: String,
    pub code: ErrorCode,
}

// 统一的错误响应结构：{"error": {"message": "...", "code": "..."}}
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
}

impl ApiErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code,
            },
        }
    }
}

// 删除等操作的简单响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 按错误码的状态构造错误响应
pub fn create_error_response(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(code.status()).json(ApiErrorResponse::new(code, message))
}

/// 可通过 `?` 传播的接口错误
#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn missing_fields(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingFields, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.code.status()
    }

    fn error_response(&self) -> HttpResponse {
        create_error_response(self.code, self.message.clone())
    }
}

impl From<ClassConnectError> for ApiError {
    fn from(err: ClassConnectError) -> Self {
        let code = err.api_code();
        if code == ErrorCode::ServerError {
            tracing::error!("{}", err.format_simple());
        } else {
            tracing::debug!("{}", err.format_simple());
        }
        Self::new(code, err.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(ApiErrorResponse::new(
            ErrorCode::AccessDenied,
            "You do not have access to this class",
        ))
        .unwrap();
        assert_eq!(body["error"]["code"], "ACCESS_DENIED");
        assert_eq!(
            body["error"]["message"],
            "You do not have access to this class"
        );
    }

    #[test]
    fn internal_errors_are_masked() {
        let api: ApiError = ClassConnectError::database_operation("connection reset").into();
        assert_eq!(api.code, ErrorCode::ServerError);
        assert!(!api.message.contains("connection reset"));
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_detail_is_not_sent_to_clients() {
        let api: ApiError = ClassConnectError::not_found("作业不存在").into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert_eq!(api.message, "Resource not found");
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
    }
}
