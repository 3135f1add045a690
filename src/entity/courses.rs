//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub year: i32,
    pub term: String,
    pub is_required: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::evaluation_nodes::Entity")]
    EvaluationNodes,
    #[sea_orm(has_one = "super::thresholds::Entity")]
    Threshold,
}

impl Related<super::evaluation_nodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationNodes.def()
    }
}

impl Related<super::thresholds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Threshold.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;
        use chrono::{DateTime, Utc};

        Course {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            year: self.year,
            // 未知取值按通年处理
            term: self.term.parse().unwrap_or_default(),
            is_required: self.is_required,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
