//! 成绩录入实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub node_id: i64,
    pub earned: Option<f64>,
    pub max_points: Option<f64>,
    pub rate: Option<f64>,
    pub attended: Option<i32>,
    pub total: Option<i32>,
    pub adjustment: f64,
    pub status: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluation_nodes::Entity",
        from = "Column::NodeId",
        to = "super::evaluation_nodes::Column::Id"
    )]
    Node,
}

impl Related<super::evaluation_nodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Node.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entry(self) -> crate::models::entries::entities::Entry {
        use crate::models::entries::entities::Entry;
        use chrono::{DateTime, Utc};

        Entry {
            id: self.id,
            user_id: self.user_id,
            node_id: self.node_id,
            earned: self.earned,
            max: self.max_points,
            rate: self.rate,
            attended: self.attended,
            total: self.total,
            adjustment: self.adjustment,
            status: self.status.parse().unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
