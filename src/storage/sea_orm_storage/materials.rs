//! 资料存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, group_by_parent};
use crate::entity::material_attachments::{
    ActiveModel as AttachmentActiveModel, Column as AttachmentColumn, Entity as MaterialAttachments,
};
use crate::entity::materials::{ActiveModel, Column, Entity as Materials, Model};
use crate::entity::topics::{Column as TopicColumn, Entity as Topics};
use crate::errors::{ClassConnectError, Result};
use crate::models::files::entities::StoredFile;
use crate::models::materials::{entities::Material, requests::NewMaterial};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_material_impl(
        &self,
        material: NewMaterial,
        files: &[StoredFile],
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();
        let id = uuid::Uuid::new_v4().to_string();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            id: Set(id.clone()),
            topic_id: Set(material.topic_id),
            title: Set(material.title),
            description: Set(material.description),
            created_by: Set(material.created_by),
            created_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| ClassConnectError::database_operation(format!("创建资料失败: {e}")))?;

        let rows: Vec<AttachmentActiveModel> = files
            .iter()
            .map(|file| AttachmentActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                material_id: Set(id.clone()),
                file_name: Set(file.original_name.clone()),
                file_path: Set(file.stored_name.clone()),
                file_url: Set(file.url.clone()),
                file_size: Set(file.size),
                file_type: Set(file.mime_type.clone()),
                uploaded_at: Set(now),
            })
            .collect();
        if !rows.is_empty() {
            MaterialAttachments::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| {
                    ClassConnectError::database_operation(format!("保存资料附件失败: {e}"))
                })?;
        }

        // 读回在事务内完成，提交成功即返回完整结果
        let created = Self::assemble_materials(&txn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| ClassConnectError::not_found("资料不存在"))?;

        txn.commit()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created)
    }

    pub async fn get_material_by_id_impl(&self, id: &str) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询资料失败: {e}")))?;

        match result {
            Some(model) => Ok(Self::assemble_materials(&self.db, vec![model])
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    /// 班级资料：经由班级下的主题查找，按发布时间倒序
    pub async fn list_materials_by_class_impl(&self, class_id: &str) -> Result<Vec<Material>> {
        let topic_ids: Vec<String> = Topics::find()
            .select_only()
            .column(TopicColumn::Id)
            .filter(TopicColumn::ClassId.eq(class_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询主题失败: {e}")))?;

        if topic_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Materials::find()
            .filter(Column::TopicId.is_in(topic_ids))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询资料列表失败: {e}")))?;

        Self::assemble_materials(&self.db, models).await
    }

    async fn assemble_materials<C: ConnectionTrait>(
        db: &C,
        models: Vec<Model>,
    ) -> Result<Vec<Material>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let topic_ids: Vec<String> = models.iter().map(|m| m.topic_id.clone()).collect();

        let topics: HashMap<String, (String, String)> = Topics::find()
            .select_only()
            .columns([TopicColumn::Id, TopicColumn::Name, TopicColumn::ClassId])
            .filter(TopicColumn::Id.is_in(topic_ids))
            .into_tuple::<(String, String, String)>()
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询主题失败: {e}")))?
            .into_iter()
            .map(|(id, name, class_id)| (id, (name, class_id)))
            .collect();

        let attachments = MaterialAttachments::find()
            .filter(AttachmentColumn::MaterialId.is_in(ids))
            .order_by_asc(AttachmentColumn::UploadedAt)
            .all(db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询资料附件失败: {e}")))?;
        let mut attachments = group_by_parent(attachments, |a| a.material_id.clone());

        Ok(models
            .into_iter()
            .map(|model| {
                let topic = topics.get(&model.topic_id).cloned();
                let files = attachments
                    .remove(&model.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|a| a.into_attachment())
                    .collect();
                model.into_material(topic, files)
            })
            .collect())
    }
}
