//! 评价节点存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::entries::{Column as EntryColumn, Entity as Entries};
use crate::entity::evaluation_nodes::{ActiveModel, Column, DUE_DATE_FORMAT, Entity as EvaluationNodes};
use crate::errors::{RakutanError, Result};
use crate::models::{
    events::responses::CourseEvent,
    nodes::{
        entities::EvaluationNode,
        requests::{CreateNodeRequest, UpdateNodeRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建节点，结构合法性由服务层保证
    pub async fn create_node_impl(
        &self,
        course_id: i64,
        req: CreateNodeRequest,
    ) -> Result<EvaluationNode> {
        let model = ActiveModel {
            course_id: Set(course_id),
            parent_id: Set(req.parent_id),
            name: Set(req.name),
            weight: Set(req.weight),
            input_type: Set(req.input_type.to_string()),
            is_leaf: Set(req.is_leaf),
            sort_order: Set(req.order),
            due_date: Set(req.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string())),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("创建节点失败: {e}")))?;

        Ok(result.into_node())
    }

    /// 通过 ID 获取节点
    pub async fn get_node_by_id_impl(&self, node_id: i64) -> Result<Option<EvaluationNode>> {
        let result = EvaluationNodes::find_by_id(node_id)
            .one(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询节点失败: {e}")))?;

        Ok(result.map(|m| m.into_node()))
    }

    /// 列出课程的全部节点
    pub async fn list_course_nodes_impl(&self, course_id: i64) -> Result<Vec<EvaluationNode>> {
        let nodes = EvaluationNodes::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程节点失败: {e}")))?;

        Ok(nodes.into_iter().map(|m| m.into_node()).collect())
    }

    /// 更新节点，父节点和节点类型不可修改
    pub async fn update_node_impl(
        &self,
        node_id: i64,
        update: UpdateNodeRequest,
    ) -> Result<Option<EvaluationNode>> {
        if self.get_node_by_id_impl(node_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(node_id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }

        if let Some(input_type) = update.input_type {
            model.input_type = Set(input_type.to_string());
        }

        if let Some(order) = update.order {
            model.sort_order = Set(order);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()));
        }

        // 没有任何字段需要更新时直接返回
        if model.is_changed() {
            model
                .update(&self.db)
                .await
                .map_err(|e| RakutanError::database_operation(format!("更新节点失败: {e}")))?;
        }

        self.get_node_by_id_impl(node_id).await
    }

    /// 删除节点及其所有后代，连同这些节点上的录入
    pub async fn delete_node_impl(&self, node_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RakutanError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = EvaluationNodes::find_by_id(node_id)
            .one(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询节点失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        // 逐层收集子树
        let mut subtree = vec![node_id];
        let mut frontier = vec![node_id];
        while !frontier.is_empty() {
            let children: Vec<i64> = EvaluationNodes::find()
                .select_only()
                .column(Column::Id)
                .filter(Column::ParentId.is_in(frontier))
                .into_tuple()
                .all(&txn)
                .await
                .map_err(|e| RakutanError::database_operation(format!("查询子节点失败: {e}")))?;
            subtree.extend(children.iter().copied());
            frontier = children;
        }

        Entries::delete_many()
            .filter(EntryColumn::NodeId.is_in(subtree.clone()))
            .exec(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("删除录入失败: {e}")))?;

        let result = EvaluationNodes::delete_many()
            .filter(Column::Id.is_in(subtree))
            .exec(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("删除节点失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RakutanError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出用户所有课程中带截止日期的节点，按日期升序
    pub async fn list_events_impl(&self, owner_id: i64) -> Result<Vec<CourseEvent>> {
        let courses: HashMap<i64, String> = Courses::find()
            .select_only()
            .column(CourseColumn::Id)
            .column(CourseColumn::Name)
            .filter(CourseColumn::OwnerId.eq(owner_id))
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .collect();

        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let nodes = EvaluationNodes::find()
            .filter(Column::CourseId.is_in(courses.keys().copied().collect::<Vec<_>>()))
            .filter(Column::DueDate.is_not_null())
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询日程失败: {e}")))?;

        Ok(nodes
            .into_iter()
            .map(|m| m.into_node())
            .filter_map(|node| {
                let due_date = node.due_date?;
                Some(CourseEvent {
                    id: node.id,
                    course_name: courses.get(&node.course_id).cloned().unwrap_or_default(),
                    course_id: node.course_id,
                    name: node.name,
                    due_date,
                    input_type: node.input_type,
                    weight: node.weight,
                })
            })
            .collect())
    }
}
