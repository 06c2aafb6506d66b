//! 班级存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::careers::{Column as CareerColumn, Entity as Careers};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Model as ClassModel};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassConnectError, Result};
use crate::models::classes::{entities::Class, requests::NewClass, responses::ClassResponse};
use crate::utils::random_code::generate_class_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::warn;

// 邀请码冲突时的最大尝试次数
const CLASS_CODE_ATTEMPTS: usize = 5;

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, class: NewClass) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        for attempt in 1..=CLASS_CODE_ATTEMPTS {
            let model = ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                name: Set(class.name.clone()),
                description: Set(class.description.clone()),
                class_code: Set(generate_class_code()),
                career_id: Set(class.career_id.clone()),
                semester: Set(class.semester.clone()),
                teacher_id: Set(class.teacher_id.clone()),
                created_at: Set(now),
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_class()),
                Err(e) if is_unique_violation(&e) => {
                    warn!("Class code collision on attempt {}", attempt);
                }
                Err(e) => {
                    return Err(ClassConnectError::database_operation(format!(
                        "创建班级失败: {e}"
                    )));
                }
            }
        }

        Err(ClassConnectError::conflict(format!(
            "无法生成唯一的班级邀请码（已尝试 {CLASS_CODE_ATTEMPTS} 次）"
        )))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: &str) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 班级详情
    pub async fn get_class_detail_impl(&self, class_id: &str) -> Result<Option<ClassResponse>> {
        let result = Classes::find_by_id(class_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询班级失败: {e}")))?;

        match result {
            Some(model) => Ok(self.enrich_classes(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 教师任课的班级
    pub async fn list_classes_for_teacher_impl(
        &self,
        teacher_id: &str,
    ) -> Result<Vec<ClassResponse>> {
        let classes = Classes::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询班级列表失败: {e}")))?;

        self.enrich_classes(classes).await
    }

    /// 学生已选课的班级
    pub async fn list_classes_for_student_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<ClassResponse>> {
        let class_ids: Vec<String> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询选课记录失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let classes = Classes::find()
            .filter(Column::Id.is_in(class_ids))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询班级列表失败: {e}")))?;

        self.enrich_classes(classes).await
    }

    /// 是否为班级任课教师
    pub async fn is_teacher_of_impl(&self, class_id: &str, user_id: &str) -> Result<bool> {
        let count = Classes::find()
            .filter(Column::Id.eq(class_id))
            .filter(Column::TeacherId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询班级归属失败: {e}")))?;

        Ok(count > 0)
    }

    /// 是否已选课
    pub async fn is_enrolled_in_impl(&self, class_id: &str, user_id: &str) -> Result<bool> {
        let count = Enrollments::find()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .filter(EnrollmentColumn::StudentId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 补充专业名、教师名与学生数量
    async fn enrich_classes(&self, classes: Vec<ClassModel>) -> Result<Vec<ClassResponse>> {
        if classes.is_empty() {
            return Ok(Vec::new());
        }

        let class_ids: Vec<String> = classes.iter().map(|c| c.id.clone()).collect();
        let career_ids: Vec<String> = classes.iter().map(|c| c.career_id.clone()).collect();
        let teacher_ids: Vec<String> = classes.iter().map(|c| c.teacher_id.clone()).collect();

        let career_names: HashMap<String, String> = Careers::find()
            .select_only()
            .columns([CareerColumn::Id, CareerColumn::Name])
            .filter(CareerColumn::Id.is_in(career_ids))
            .into_tuple::<(String, String)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询专业失败: {e}")))?
            .into_iter()
            .collect();

        let teacher_names: HashMap<String, String> = Users::find()
            .select_only()
            .columns([UserColumn::Id, UserColumn::Name])
            .filter(UserColumn::Id.is_in(teacher_ids))
            .into_tuple::<(String, String)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询教师失败: {e}")))?
            .into_iter()
            .collect();

        let enrolled: Vec<String> = Enrollments::find()
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .filter(EnrollmentColumn::ClassId.is_in(class_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("统计班级人数失败: {e}")))?;

        let mut student_counts: HashMap<String, i64> = HashMap::new();
        for class_id in enrolled {
            *student_counts.entry(class_id).or_default() += 1;
        }

        Ok(classes
            .into_iter()
            .map(|model| {
                let career_name = career_names.get(&model.career_id).cloned();
                let teacher_name = teacher_names.get(&model.teacher_id).cloned();
                let student_count = student_counts.get(&model.id).copied().unwrap_or(0);
                ClassResponse {
                    class: model.into_class(),
                    career_name,
                    teacher_name,
                    student_count,
                }
            })
            .collect())
    }
}
