//! 成绩录入存储操作

use super::SeaOrmStorage;
use crate::entity::entries::{ActiveModel, Column, Entity as Entries};
use crate::entity::evaluation_nodes::{Column as NodeColumn, Entity as EvaluationNodes};
use crate::errors::{RakutanError, Result};
use crate::models::entries::{entities::Entry, requests::UpsertEntryRequest};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 列出用户在某课程下的全部录入
    pub async fn list_course_entries_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Vec<Entry>> {
        let node_ids: Vec<i64> = EvaluationNodes::find()
            .select_only()
            .column(NodeColumn::Id)
            .filter(NodeColumn::CourseId.eq(course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程节点失败: {e}")))?;

        if node_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entries = Entries::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::NodeId.is_in(node_ids))
            .order_by_asc(Column::NodeId)
            .all(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询录入失败: {e}")))?;

        Ok(entries.into_iter().map(|m| m.into_entry()).collect())
    }

    /// 获取用户对某节点的录入
    pub async fn get_entry_impl(&self, user_id: i64, node_id: i64) -> Result<Option<Entry>> {
        let result = Entries::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::NodeId.eq(node_id))
            .one(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询录入失败: {e}")))?;

        Ok(result.map(|m| m.into_entry()))
    }

    /// 新建或更新录入
    ///
    /// 先与已有记录合并（省略的字段沿用原值），再以 (user_id, node_id) 为冲突键写入，
    /// 同一用户对同一节点始终只有一行。
    pub async fn upsert_entry_impl(&self, user_id: i64, req: UpsertEntryRequest) -> Result<Entry> {
        let existing = self.get_entry_impl(user_id, req.node_id).await?;
        let now = chrono::Utc::now().timestamp();

        let base = existing.as_ref();
        let earned = req.earned.unwrap_or_else(|| base.and_then(|e| e.earned));
        let max = req.max.unwrap_or_else(|| base.and_then(|e| e.max));
        let rate = req.rate.unwrap_or_else(|| base.and_then(|e| e.rate));
        let attended = req.attended.unwrap_or_else(|| base.and_then(|e| e.attended));
        let total = req.total.unwrap_or_else(|| base.and_then(|e| e.total));
        let adjustment = req
            .adjustment
            .unwrap_or_else(|| base.map_or(0.0, |e| e.adjustment));
        let status = req
            .status
            .unwrap_or_else(|| base.map(|e| e.status).unwrap_or_default());

        let model = ActiveModel {
            user_id: Set(user_id),
            node_id: Set(req.node_id),
            earned: Set(earned),
            max_points: Set(max),
            rate: Set(rate),
            attended: Set(attended),
            total: Set(total),
            adjustment: Set(adjustment),
            status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        Entries::insert(model)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::NodeId])
                    .update_columns([
                        Column::Earned,
                        Column::MaxPoints,
                        Column::Rate,
                        Column::Attended,
                        Column::Total,
                        Column::Adjustment,
                        Column::Status,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("保存录入失败: {e}")))?;

        self.get_entry_impl(user_id, req.node_id)
            .await?
            .ok_or_else(|| RakutanError::database_operation("录入保存后未能读取"))
    }
}
