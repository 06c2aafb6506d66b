//! 公告存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, group_by_parent};
use crate::entity::announcement_attachments::{
    ActiveModel as AttachmentActiveModel, Column as AttachmentColumn, Entity as AnnouncementAttachments,
};
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements, Model};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassConnectError, Result};
use crate::models::announcements::{entities::Announcement, requests::NewAnnouncement};
use crate::models::files::entities::StoredFile;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建公告，公告与附件记录在同一事务中写入
    pub async fn create_announcement_impl(
        &self,
        announcement: NewAnnouncement,
        files: &[StoredFile],
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();
        let id = uuid::Uuid::new_v4().to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            id: Set(id.clone()),
            class_id: Set(announcement.class_id),
            title: Set(announcement.title),
            content: Set(announcement.content),
            author_id: Set(announcement.author_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassConnectError::database_operation(format!("创建公告失败: {e}")))?;

        let rows: Vec<AttachmentActiveModel> = files
            .iter()
            .map(|file| AttachmentActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                announcement_id: Set(id.clone()),
                file_name: Set(file.original_name.clone()),
                file_path: Set(file.stored_name.clone()),
                file_url: Set(file.url.clone()),
                file_size: Set(file.size),
                file_type: Set(file.mime_type.clone()),
                uploaded_at: Set(now),
            })
            .collect();
        if !rows.is_empty() {
            AnnouncementAttachments::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| {
                    ClassConnectError::database_operation(format!("保存公告附件失败: {e}"))
                })?;
        }

        // 读回在事务内完成，提交成功即返回完整结果
        let created = Self::assemble_announcements(&txn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| ClassConnectError::not_found("公告不存在"))?;

        txn.commit()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    pub async fn get_announcement_by_id_impl(&self, id: &str) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询公告失败: {e}")))?;

        match result {
            Some(model) => Ok(Self::assemble_announcements(&self.db, vec![model])
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    /// 班级公告，按发布时间倒序
    pub async fn list_announcements_by_class_impl(
        &self,
        class_id: &str,
    ) -> Result<Vec<Announcement>> {
        let models = Announcements::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询公告列表失败: {e}")))?;

        Self::assemble_announcements(&self.db, models).await
    }

    /// 删除公告及附件记录，返回附件的存储名
    pub async fn delete_announcement_impl(&self, id: &str) -> Result<Option<Vec<String>>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Announcements::find_by_id(id.to_string())
            .one(&txn)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询公告失败: {e}")))?;
        if exists.is_none() {
            return Ok(None);
        }

        let stored_names: Vec<String> = AnnouncementAttachments::find()
            .select_only()
            .column(AttachmentColumn::FilePath)
            .filter(AttachmentColumn::AnnouncementId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询公告附件失败: {e}")))?;

        AnnouncementAttachments::delete_many()
            .filter(AttachmentColumn::AnnouncementId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("删除公告附件失败: {e}")))?;

        Announcements::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("删除公告失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(stored_names))
    }

    /// 批量补充作者名和附件，保持输入顺序
    async fn assemble_announcements<C: ConnectionTrait>(
        db: &C,
        models: Vec<Model>,
    ) -> Result<Vec<Announcement>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let author_ids: Vec<String> = models.iter().map(|m| m.author_id.clone()).collect();

        let authors: HashMap<String, String> = Users::find()
            .select_only()
            .columns([UserColumn::Id, UserColumn::Name])
            .filter(UserColumn::Id.is_in(author_ids))
            .into_tuple::<(String, String)>()
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询作者失败: {e}")))?
            .into_iter()
            .collect();

        let attachments = AnnouncementAttachments::find()
            .filter(AttachmentColumn::AnnouncementId.is_in(ids))
            .order_by_asc(AttachmentColumn::UploadedAt)
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询公告附件失败: {e}")))?;
        let mut attachments = group_by_parent(attachments, |a| a.announcement_id.clone());

        Ok(models
            .into_iter()
            .map(|model| {
                let author_name = authors.get(&model.author_id).cloned();
                let files = attachments
                    .remove(&model.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| a.into_attachment())
                    .collect();
                model.into_announcement(author_name, files)
            })
            .collect())
    }
}
