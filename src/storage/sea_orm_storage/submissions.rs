//! 提交与批改存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, group_by_parent, is_unique_violation};
use crate::entity::submission_files::{
    ActiveModel as FileActiveModel, Column as FileColumn, Entity as SubmissionFiles,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassConnectError, Result};
use crate::models::assignments::entities::Submission;
use crate::models::files::entities::StoredFile;
use crate::storage::SubmissionUpsert;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

// 首次提交并发冲突时的重试次数
const UPSERT_ATTEMPTS: usize = 2;

impl SeaOrmStorage {
    /// 提交或重新提交作业
    ///
    /// 每个学生每个作业只有一条提交记录。重新提交会覆盖留言、替换全部文件，
    /// 并清空成绩、评语和批改时间。被替换文件的存储名随结果返回，
    /// 由调用方在事务提交后删除磁盘文件。写入和读回在同一事务内完成。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: &str,
        student_id: &str,
        comment: Option<String>,
        files: &[StoredFile],
    ) -> Result<SubmissionUpsert> {
        let mut attempt = 0;
        let (txn, model, replaced_files) = loop {
            attempt += 1;
            match self
                .upsert_submission_once(assignment_id, student_id, comment.clone(), files)
                .await
            {
                Ok(result) => break result,
                // 另一请求抢先插入了同一 (作业, 学生) 记录，重来一次走更新分支
                Err(e) if is_unique_violation(&e) && attempt < UPSERT_ATTEMPTS => {
                    debug!(
                        "Concurrent first submission for assignment {}, retrying",
                        assignment_id
                    );
                }
                Err(e) => {
                    return Err(ClassConnectError::database_operation(format!(
                        "保存提交失败: {e}"
                    )));
                }
            }
        };

        // 读回与写入同属一个事务，失败时旧文件记录原样保留
        let submission = Self::assemble_submissions(&txn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| ClassConnectError::not_found("提交不存在"))?;

        txn.commit()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SubmissionUpsert {
            submission,
            replaced_files,
        })
    }

    /// 写入一次，返回尚未提交的事务
    async fn upsert_submission_once(
        &self,
        assignment_id: &str,
        student_id: &str,
        comment: Option<String>,
        files: &[StoredFile],
    ) -> std::result::Result<(DatabaseTransaction, Model, Vec<String>), DbErr> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await?;

        let (model, replaced_files) = match existing {
            Some(existing) => {
                let replaced: Vec<String> = SubmissionFiles::find()
                    .select_only()
                    .column(FileColumn::FilePath)
                    .filter(FileColumn::SubmissionId.eq(existing.id.as_str()))
                    .into_tuple()
                    .all(&txn)
                    .await?;

                SubmissionFiles::delete_many()
                    .filter(FileColumn::SubmissionId.eq(existing.id.as_str()))
                    .exec(&txn)
                    .await?;

                let mut active: ActiveModel = existing.into();
                active.comment = Set(comment);
                active.submitted_at = Set(now);
                active.grade = Set(None);
                active.feedback = Set(None);
                active.graded_at = Set(None);
                (active.update(&txn).await?, replaced)
            }
            None => {
                let model = ActiveModel {
                    id: Set(uuid::Uuid::new_v4().to_string()),
                    assignment_id: Set(assignment_id.to_string()),
                    student_id: Set(student_id.to_string()),
                    comment: Set(comment),
                    submitted_at: Set(now),
                    grade: Set(None),
                    feedback: Set(None),
                    graded_at: Set(None),
                }
                .insert(&txn)
                .await?;
                (model, Vec::new())
            }
        };

        let rows: Vec<FileActiveModel> = files
            .iter()
            .map(|file| FileActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                submission_id: Set(model.id.clone()),
                file_name: Set(file.original_name.clone()),
                file_path: Set(file.stored_name.clone()),
                file_url: Set(file.url.clone()),
                file_size: Set(file.size),
                file_type: Set(file.mime_type.clone()),
                uploaded_at: Set(now),
            })
            .collect();
        if !rows.is_empty() {
            SubmissionFiles::insert_many(rows).exec(&txn).await?;
        }

        Ok((txn, model, replaced_files))
    }

    pub async fn get_submission_by_id_impl(&self, id: &str) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询提交失败: {e}")))?;

        match result {
            Some(model) => Ok(Self::assemble_submissions(&self.db, vec![model])
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    /// 作业的全部提交，按提交时间倒序
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Submission>> {
        let models = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询提交列表失败: {e}")))?;

        Self::assemble_submissions(&self.db, models).await
    }

    /// 学生在指定作业上的提交
    pub async fn list_student_submissions_impl(
        &self,
        student_id: &str,
        assignment_ids: &[String],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询提交列表失败: {e}")))?;

        Self::assemble_submissions(&self.db, models).await
    }

    /// 批改，提交不存在时返回 None
    pub async fn grade_submission_impl(
        &self,
        id: &str,
        grade: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = Submissions::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.grade = Set(Some(grade));
        active.feedback = Set(feedback);
        active.graded_at = Set(Some(chrono::Utc::now().timestamp()));

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("保存成绩失败: {e}")))?;

        Ok(Self::assemble_submissions(&self.db, vec![model])
            .await?
            .pop())
    }

    /// 批量补充学生信息和文件
    async fn assemble_submissions<C: ConnectionTrait>(
        db: &C,
        models: Vec<Model>,
    ) -> Result<Vec<Submission>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let student_ids: Vec<String> = models.iter().map(|m| m.student_id.clone()).collect();

        let students: HashMap<String, (String, String)> = Users::find()
            .select_only()
            .columns([UserColumn::Id, UserColumn::Name, UserColumn::Email])
            .filter(UserColumn::Id.is_in(student_ids))
            .into_tuple::<(String, String, String)>()
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|(id, name, email)| (id, (name, email)))
            .collect();

        let files = SubmissionFiles::find()
            .filter(FileColumn::SubmissionId.is_in(ids))
            .order_by_asc(FileColumn::UploadedAt)
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询提交文件失败: {e}")))?;
        let mut files = group_by_parent(files, |f| f.submission_id.clone());

        Ok(models
            .into_iter()
            .map(|model| {
                let student = students.get(&model.student_id).cloned();
                let files = files
                    .remove(&model.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|f| f.into_attachment())
                    .collect();
                model.into_submission(student, files)
            })
            .collect())
    }
}
