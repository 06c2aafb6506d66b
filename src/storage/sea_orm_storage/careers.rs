//! 专业存储操作

use super::SeaOrmStorage;
use crate::entity::careers::{Column, Entity as Careers};
use crate::errors::{ClassConnectError, Result};
use crate::models::careers::entities::Career;
use sea_orm::{EntityTrait, QueryOrder};

impl SeaOrmStorage {
    pub async fn list_careers_impl(&self) -> Result<Vec<Career>> {
        let careers = Careers::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询专业列表失败: {e}")))?;

        Ok(careers.into_iter().map(|m| m.into_career()).collect())
    }

    pub async fn get_career_by_id_impl(&self, id: &str) -> Result<Option<Career>> {
        let career = Careers::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("查询专业失败: {e}")))?;

        Ok(career.map(|m| m.into_career()))
    }
}
