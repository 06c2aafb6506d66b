//! 用户存储操作

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ClassConnectError, Result};
use crate::models::users::entities::{User, UserRole};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.to_string()),
            avatar_url: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ClassConnectError::conflict(format!("邮箱已被注册: {email}"))
            } else {
                ClassConnectError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: &str) -> Result<Option<User>> {
        let result = Users::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 检索学生
    pub async fn search_students_impl(
        &self,
        query: &str,
        exclude_class_id: Option<&str>,
        limit: u64,
    ) -> Result<Vec<User>> {
        let pattern = format!("%{}%", escape_like_pattern(query));
        let like = || LikeExpr::new(pattern.clone()).escape('\\');

        let mut select = Users::find()
            .filter(Column::Role.eq(UserRole::STUDENT))
            .filter(
                Condition::any()
                    .add(Column::Name.like(like()))
                    .add(Column::Email.like(like()))
                    .add(Column::Id.like(like())),
            );

        if let Some(class_id) = exclude_class_id {
            let enrolled: Vec<String> = Enrollments::find()
                .select_only()
                .column(EnrollmentColumn::StudentId)
                .filter(EnrollmentColumn::ClassId.eq(class_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    ClassConnectError::database_operation(format!("查询班级学生失败: {e}"))
                })?;
            if !enrolled.is_empty() {
                select = select.filter(Column::Id.is_not_in(enrolled));
            }
        }

        let users = select
            .order_by_asc(Column::Name)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("检索学生失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }
}
