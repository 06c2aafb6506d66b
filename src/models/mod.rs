pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod careers;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod files;
pub mod materials;
pub mod topics;
pub mod users;

use actix_web::http::StatusCode;
use serde::Serialize;
use ts_rs::TS;

pub use common::{
    ApiError, ApiErrorResponse, AppStartTime, HealthResponse, MessageResponse,
    create_error_response,
};

/// 对外错误码，序列化为 `{"error": {"code": ...}}` 中的字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    // 400
    MissingFields,
    InvalidRole,
    InvalidEmail,
    InvalidDueDate,
    InvalidGrade,
    MissingQuery,
    AlreadyEnrolled,
    UserExists,
    InvalidCredentials,
    DueDatePassed,
    FileTooLarge,
    UnsupportedType,
    UploadError,
    // 401
    Unauthorized,
    InvalidToken,
    // 403
    UnauthorizedRole,
    AccessDenied,
    // 404
    NotFound,
    AssignmentNotFound,
    SubmissionNotFound,
    TopicNotFound,
    StudentNotFound,
    // 500
    ServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingFields => "MISSING_FIELDS",
            ErrorCode::InvalidRole => "INVALID_ROLE",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidDueDate => "INVALID_DUE_DATE",
            ErrorCode::InvalidGrade => "INVALID_GRADE",
            ErrorCode::MissingQuery => "MISSING_QUERY",
            ErrorCode::AlreadyEnrolled => "ALREADY_ENROLLED",
            ErrorCode::UserExists => "USER_EXISTS",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::DueDatePassed => "DUE_DATE_PASSED",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::UnsupportedType => "UNSUPPORTED_TYPE",
            ErrorCode::UploadError => "UPLOAD_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::UnauthorizedRole => "UNAUTHORIZED_ROLE",
            ErrorCode::AccessDenied => "ACCESS_DENIED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            ErrorCode::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            ErrorCode::TopicNotFound => "TOPIC_NOT_FOUND",
            ErrorCode::StudentNotFound => "STUDENT_NOT_FOUND",
            ErrorCode::ServerError => "SERVER_ERROR",
        }
    }

    /// 错误码对应的 HTTP 状态
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::MissingFields
            | ErrorCode::InvalidRole
            | ErrorCode::InvalidEmail
            | ErrorCode::InvalidDueDate
            | ErrorCode::InvalidGrade
            | ErrorCode::MissingQuery
            | ErrorCode::AlreadyEnrolled
            | ErrorCode::UserExists
            | ErrorCode::InvalidCredentials
            | ErrorCode::DueDatePassed
            | ErrorCode::FileTooLarge
            | ErrorCode::UnsupportedType
            | ErrorCode::UploadError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized | ErrorCode::InvalidToken => StatusCode::UNAUTHORIZED,
            ErrorCode::UnauthorizedRole | ErrorCode::AccessDenied => StatusCode::FORBIDDEN,
            ErrorCode::NotFound
            | ErrorCode::AssignmentNotFound
            | ErrorCode::SubmissionNotFound
            | ErrorCode::TopicNotFound
            | ErrorCode::StudentNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_code_matches_as_str() {
        for code in [
            ErrorCode::MissingFields,
            ErrorCode::DueDatePassed,
            ErrorCode::UnauthorizedRole,
            ErrorCode::StudentNotFound,
            ErrorCode::ServerError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn status_groups() {
        assert_eq!(ErrorCode::InvalidCredentials.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::AccessDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::TopicNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ServerError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
