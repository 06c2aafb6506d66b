//! 选课存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassConnectError, Result};
use crate::models::enrollments::{entities::Enrollment, responses::EnrolledStudent};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建选课记录，(class_id, student_id) 唯一索引冲突即视为已选课
    pub async fn create_enrollment_impl(
        &self,
        class_id: &str,
        student_id: &str,
    ) -> Result<Enrollment> {
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            class_id: Set(class_id.to_string()),
            student_id: Set(student_id.to_string()),
            enrolled_at: Set(Utc::now().timestamp()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ClassConnectError::conflict("学生已在该班级中")
            } else {
                ClassConnectError::database_operation(format!("创建选课记录失败: {e}"))
            }
        })?;

        Ok(result.into_enrollment())
    }

    /// 删除选课记录
    pub async fn delete_enrollment_impl(&self, class_id: &str, student_id: &str) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班级学生列表
    pub async fn list_class_students_impl(&self, class_id: &str) -> Result<Vec<EnrolledStudent>> {
        let enrollments = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询选课记录失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<String> = enrollments.iter().map(|e| e.student_id.clone()).collect();
        let students: HashMap<String, _> = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let mut result: Vec<EnrolledStudent> = enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let student = students.get(&enrollment.student_id)?;
                Some(EnrolledStudent {
                    enrollment_id: enrollment.id,
                    student_id: enrollment.student_id,
                    name: student.name.clone(),
                    email: student.email.clone(),
                    avatar_url: student.avatar_url.clone(),
                    enrolled_at: DateTime::<Utc>::from_timestamp(enrollment.enrolled_at, 0)
                        .unwrap_or_default(),
                })
            })
            .collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result)
    }
}
