//! 评价节点实体

use sea_orm::entity::prelude::*;

/// `due_date` 以 ISO 日期字符串存储
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_nodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub weight: f64,
    pub input_type: String,
    pub is_leaf: bool,
    pub sort_order: i32,
    pub due_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
    #[sea_orm(has_many = "super::entries::Entity")]
    Entries,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_node(self) -> crate::models::nodes::entities::EvaluationNode {
        use crate::models::nodes::entities::EvaluationNode;
        use chrono::NaiveDate;

        EvaluationNode {
            id: self.id,
            course_id: self.course_id,
            parent_id: self.parent_id,
            name: self.name,
            weight: self.weight,
            input_type: self.input_type.parse().unwrap_or_default(),
            is_leaf: self.is_leaf,
            order: self.sort_order,
            due_date: self
                .due_date
                .and_then(|d| NaiveDate::parse_from_str(&d, DUE_DATE_FORMAT).ok()),
        }
    }
}
