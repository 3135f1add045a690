use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::models::nodes::entities::InputType;

// 日程视图中的一项：带截止日期的评价节点
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CourseEvent {
    pub id: i64,
    pub name: String,
    pub course_id: i64,
    pub course_name: String,
    pub due_date: NaiveDate,
    pub input_type: InputType,
    pub weight: f64,
}
