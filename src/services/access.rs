//! 班级访问控制
//!
//! 教师只能访问自己任课的班级，学生只能访问已选课的班级。
//! 路由上的 [`RequireClassAccess`](crate::middlewares::RequireClassAccess) 和
//! 请求体里带 classId 的处理程序都走这里的判定。

use crate::errors::Result;
use crate::models::auth::entities::AuthUser;
use crate::models::classes::entities::Class;
use crate::models::users::entities::UserRole;
use crate::models::{ApiError, ErrorCode};
use crate::storage::Storage;

/// 班级访问规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRule {
    /// 任课教师或已选课学生
    Member,
    /// 仅任课教师
    Owner,
}

pub async fn is_teacher_of(storage: &dyn Storage, class_id: &str, user_id: &str) -> Result<bool> {
    storage.is_teacher_of(class_id, user_id).await
}

pub async fn is_enrolled_in(storage: &dyn Storage, class_id: &str, user_id: &str) -> Result<bool> {
    storage.is_enrolled_in(class_id, user_id).await
}

/// 教师看任课关系，学生看选课关系
pub async fn has_class_access(storage: &dyn Storage, class_id: &str, user: &AuthUser) -> Result<bool> {
    match user.role {
        UserRole::Teacher => is_teacher_of(storage, class_id, &user.id).await,
        UserRole::Student => is_enrolled_in(storage, class_id, &user.id).await,
    }
}

/// 加载班级并按规则校验，返回班级本身
///
/// 班级不存在返回 404 NOT_FOUND；学生访问仅限教师的规则返回 403 UNAUTHORIZED_ROLE；
/// 角色正确但不是任课教师或未选课返回 403 ACCESS_DENIED。
pub async fn require_class(
    storage: &dyn Storage,
    class_id: &str,
    user: &AuthUser,
    rule: ClassRule,
) -> std::result::Result<Class, ApiError> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Class not found"))?;

    if rule == ClassRule::Owner && !user.is_teacher() {
        return Err(ApiError::new(
            ErrorCode::UnauthorizedRole,
            "Only the class teacher can perform this action",
        ));
    }

    let allowed = match user.role {
        UserRole::Teacher => class.teacher_id == user.id,
        UserRole::Student => is_enrolled_in(storage, &class.id, &user.id).await?,
    };
    if !allowed {
        return Err(ApiError::new(
            ErrorCode::AccessDenied,
            "You do not have access to this class",
        ));
    }

    Ok(class)
}

pub async fn require_class_owner(
    storage: &dyn Storage,
    class_id: &str,
    user: &AuthUser,
) -> std::result::Result<Class, ApiError> {
    require_class(storage, class_id, user, ClassRule::Owner).await
}

pub async fn require_class_member(
    storage: &dyn Storage,
    class_id: &str,
    user: &AuthUser,
) -> std::result::Result<Class, ApiError> {
    require_class(storage, class_id, user, ClassRule::Member).await
}
