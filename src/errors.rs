//! 统一错误处理模块
//!
//! 使用宏自动生成内部错误类型，支持错误代码和类型名称。
//! 这些错误不会直接暴露给客户端：实现 `ResponseError` 时只返回稳定的错误码，
//! 详情写入日志。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::models::{ApiErrorResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classconnect_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ClassConnectError {
            $($variant(String),)*
        }

        impl ClassConnectError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassConnectError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassConnectError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassConnectError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassConnectError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassConnectError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classconnect_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Unique Constraint Conflict"),
}

impl ClassConnectError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对外暴露的错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            ClassConnectError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::ServerError,
        }
    }

    /// 返回给客户端的英文提示，详情只进日志
    pub fn client_message(&self) -> &'static str {
        match self {
            ClassConnectError::NotFound(_) => "Resource not found",
            _ => "Internal server error",
        }
    }
}

impl fmt::Display for ClassConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassConnectError {}

impl ResponseError for ClassConnectError {
    fn status_code(&self) -> StatusCode {
        self.api_code().status()
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.api_code();
        // 内部细节只写日志
        match code {
            ErrorCode::NotFound => debug!("{} {}", self.code(), self.format_simple()),
            _ => error!("{} {}", self.code(), self.format_simple()),
        }
        HttpResponse::build(code.status())
            .json(ApiErrorResponse::new(code, self.client_message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassConnectError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassConnectError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClassConnectError {
    fn from(err: std::io::Error) -> Self {
        ClassConnectError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassConnectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassConnectError::database_config("test").code(), "E001");
        assert_eq!(ClassConnectError::validation("test").code(), "E005");
        assert_eq!(ClassConnectError::conflict("test").code(), "E007");
        assert_eq!(ClassConnectError::not_found("test").code(), "E006");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassConnectError::file_operation("test").error_type(),
            "File Operation Error"
        );
        assert_eq!(
            ClassConnectError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = ClassConnectError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }

    #[test]
    fn test_response_hides_internal_details() {
        let err = ClassConnectError::database_operation("near \"SELEC\": syntax error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.api_code(), ErrorCode::ServerError);

        let not_found = ClassConnectError::not_found("Class not found");
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_detail_stays_in_logs() {
        let err = ClassConnectError::not_found("公告不存在");
        assert_eq!(err.client_message(), "Resource not found");
        assert_eq!(err.message(), "公告不存在");
        assert_eq!(
            ClassConnectError::database_operation("提交事务失败").client_message(),
            "Internal server error"
        );
    }
}
