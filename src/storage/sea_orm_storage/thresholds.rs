//! 及格线存储操作

use super::SeaOrmStorage;
use crate::entity::thresholds::{ActiveModel, Column, Entity as Thresholds};
use crate::errors::{RakutanError, Result};
use crate::models::thresholds::entities::{DEFAULT_THRESHOLD, Threshold, ThresholdType};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 获取及格线
    pub async fn get_threshold_impl(&self, course_id: i64) -> Result<Option<Threshold>> {
        let result = Thresholds::find()
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询及格线失败: {e}")))?;

        Ok(result.map(|m| m.into_threshold()))
    }

    /// 不存在时写入默认及格线，已存在时保持不变
    pub async fn ensure_threshold_impl(&self, course_id: i64) -> Result<Threshold> {
        let model = ActiveModel {
            course_id: Set(course_id),
            threshold_type: Set(ThresholdType::default().to_string()),
            value: Set(DEFAULT_THRESHOLD),
            ..Default::default()
        };

        let inserted = Thresholds::insert(model)
            .on_conflict(OnConflict::column(Column::CourseId).do_nothing().to_owned())
            .exec(&self.db)
            .await;

        match inserted {
            // 已存在时 do_nothing 不插入任何行
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => {
                return Err(RakutanError::database_operation(format!(
                    "初始化及格线失败: {e}"
                )));
            }
        }

        self.get_threshold_impl(course_id)
            .await?
            .ok_or_else(|| RakutanError::database_operation("及格线初始化后未能读取"))
    }

    /// 设置及格线
    pub async fn set_threshold_impl(&self, course_id: i64, value: f64) -> Result<Threshold> {
        let model = ActiveModel {
            course_id: Set(course_id),
            threshold_type: Set(ThresholdType::default().to_string()),
            value: Set(value),
            ..Default::default()
        };

        Thresholds::insert(model)
            .on_conflict(
                OnConflict::column(Column::CourseId)
                    .update_column(Column::Value)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("保存及格线失败: {e}")))?;

        self.get_threshold_impl(course_id)
            .await?
            .ok_or_else(|| RakutanError::database_operation("及格线保存后未能读取"))
    }
}
