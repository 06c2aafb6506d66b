//! 资料实体

use sea_orm::entity::prelude::*;

use crate::models::files::entities::Attachment;
use crate::models::materials::entities::Material;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub topic_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::topics::Entity",
        from = "Column::TopicId",
        to = "super::topics::Column::Id"
    )]
    Topic,
    #[sea_orm(has_many = "super::material_attachments::Entity")]
    Attachments,
}

impl Related<super::topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl Related<super::material_attachments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// topic 为 (topic_name, class_id)
    pub fn into_material(
        self,
        topic: Option<(String, String)>,
        attachments: Vec<Attachment>,
    ) -> Material {
        use chrono::{DateTime, Utc};

        let (topic_name, class_id) = match topic {
            Some((name, class_id)) => (Some(name), Some(class_id)),
            None => (None, None),
        };

        Material {
            id: self.id,
            topic_id: self.topic_id,
            topic_name,
            class_id,
            title: self.title,
            description: self.description,
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            attachments,
        }
    }
}
