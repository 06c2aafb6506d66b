use serde::Serialize;

use crate::models::users::entities::UserRole;

/// 令牌中携带的身份，由 RequireJWT 写入请求扩展
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}
