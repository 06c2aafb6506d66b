//! 作业存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, group_by_parent};
use crate::entity::assignment_attachments::{
    ActiveModel as AttachmentActiveModel, Column as AttachmentColumn, Entity as AssignmentAttachments,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::entity::topics::{Column as TopicColumn, Entity as Topics};
use crate::errors::{ClassConnectError, Result};
use crate::models::assignments::{entities::Assignment, requests::NewAssignment};
use crate::models::files::entities::StoredFile;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业及附件记录
    pub async fn create_assignment_impl(
        &self,
        assignment: NewAssignment,
        files: &[StoredFile],
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let id = uuid::Uuid::new_v4().to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            id: Set(id.clone()),
            class_id: Set(assignment.class_id),
            topic_id: Set(assignment.topic_id),
            title: Set(assignment.title),
            description: Set(assignment.description),
            due_date: Set(assignment.due_date.timestamp()),
            created_by: Set(assignment.created_by),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassConnectError::database_operation(format!("创建作业失败: {e}")))?;

        let rows: Vec<AttachmentActiveModel> = files
            .iter()
            .map(|file| AttachmentActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                assignment_id: Set(id.clone()),
                file_name: Set(file.original_name.clone()),
                file_path: Set(file.stored_name.clone()),
                file_url: Set(file.url.clone()),
                file_size: Set(file.size),
                file_type: Set(file.mime_type.clone()),
                uploaded_at: Set(now),
            })
            .collect();
        if !rows.is_empty() {
            AssignmentAttachments::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| {
                    ClassConnectError::database_operation(format!("保存作业附件失败: {e}"))
                })?;
        }

        // 读回在事务内完成，提交成功即返回完整结果
        let created = Self::assemble_assignments(&txn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| ClassConnectError::not_found("作业不存在"))?;

        txn.commit()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    pub async fn get_assignment_by_id_impl(&self, id: &str) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询作业失败: {e}")))?;

        match result {
            Some(model) => Ok(Self::assemble_assignments(&self.db, vec![model])
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    /// 班级作业，按截止时间升序
    pub async fn list_assignments_by_class_impl(&self, class_id: &str) -> Result<Vec<Assignment>> {
        let models = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询作业列表失败: {e}")))?;

        Self::assemble_assignments(&self.db, models).await
    }

    /// 学生所有已选班级的作业，附带班级名
    pub async fn list_assignments_for_student_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<(Assignment, Option<String>)>> {
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

        let class_names: HashMap<String, String> = Classes::find()
            .select_only()
            .columns([ClassColumn::Id, ClassColumn::Name])
            .filter(ClassColumn::Id.is_in(class_ids.clone()))
            .into_tuple::<(String, String)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询班级失败: {e}")))?
            .into_iter()
            .collect();

        let models = Assignments::find()
            .filter(Column::ClassId.is_in(class_ids))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(Self::assemble_assignments(&self.db, models)
            .await?
            .into_iter()
            .map(|assignment| {
                let class_name = class_names.get(&assignment.class_id).cloned();
                (assignment, class_name)
            })
            .collect())
    }

    /// 统计每个作业的提交数，没有提交的作业不出现在结果中
    pub async fn count_submissions_impl(
        &self,
        assignment_ids: &[String],
    ) -> Result<HashMap<String, i64>> {
        if assignment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<String> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::AssignmentId)
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("统计提交数量失败: {e}")))?;

        let mut counts: HashMap<String, i64> = HashMap::new();
        for assignment_id in rows {
            *counts.entry(assignment_id).or_default() += 1;
        }
        Ok(counts)
    }

    /// 批量补充主题名和附件
    async fn assemble_assignments<C: ConnectionTrait>(
        db: &C,
        models: Vec<Model>,
    ) -> Result<Vec<Assignment>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let topic_ids: Vec<String> = models.iter().map(|m| m.topic_id.clone()).collect();

        let topic_names: HashMap<String, String> = Topics::find()
            .select_only()
            .columns([TopicColumn::Id, TopicColumn::Name])
            .filter(TopicColumn::Id.is_in(topic_ids))
            .into_tuple::<(String, String)>()
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询主题失败: {e}")))?
            .into_iter()
            .collect();

        let attachments = AssignmentAttachments::find()
            .filter(AttachmentColumn::AssignmentId.is_in(ids))
            .order_by_asc(AttachmentColumn::UploadedAt)
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询作业附件失败: {e}")))?;
        let mut attachments = group_by_parent(attachments, |a| a.assignment_id.clone());

        Ok(models
            .into_iter()
            .map(|model| {
                let topic_name = topic_names.get(&model.topic_id).cloned();
                let files = attachments
                    .remove(&model.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| a.into_attachment())
                    .collect();
                model.into_assignment(topic_name, files)
            })
            .collect())
    }
}
