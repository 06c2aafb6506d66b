//! 主题存储操作

use super::SeaOrmStorage;
use crate::entity::topics::{ActiveModel, Column, Entity as Topics};
use crate::errors::{ClassConnectError, Result};
use crate::models::topics::entities::Topic;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建主题，顺序号为班级内当前最大值 + 1
    pub async fn create_topic_impl(
        &self,
        class_id: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<Topic> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("开启事务失败: {e}")))?;

        let last = Topics::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::OrderIndex)
            .one(&txn)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询主题顺序失败: {e}")))?;
        let order_index = last.map(|t| t.order_index + 1).unwrap_or(1);

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            class_id: Set(class_id.to_string()),
            name: Set(name.to_string()),
            description: Set(description),
            order_index: Set(order_index),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("创建主题失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_topic())
    }

    pub async fn get_topic_by_id_impl(&self, topic_id: &str) -> Result<Option<Topic>> {
        let result = Topics::find_by_id(topic_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询主题失败: {e}")))?;

        Ok(result.map(|m| m.into_topic()))
    }

    pub async fn list_topics_by_class_impl(&self, class_id: &str) -> Result<Vec<Topic>> {
        let topics = Topics::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::OrderIndex)
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询主题列表失败: {e}")))?;

        Ok(topics.into_iter().map(|m| m.into_topic()).collect())
    }
}
