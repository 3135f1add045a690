use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::InputType;
use crate::models::common::deserialize_patch;

/// 创建评价节点请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/node.ts")]
pub struct CreateNodeRequest {
    pub parent_id: Option<i64>,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub input_type: InputType,
    #[serde(default)]
    pub is_leaf: bool,
    #[serde(default)]
    pub order: i32,
    pub due_date: Option<NaiveDate>, // "YYYY-MM-DD"
}

/// 更新评价节点请求
///
/// 节点类型（叶子/分支）和父节点在创建后不可修改，树结构只在创建时校验。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/node.ts")]
pub struct UpdateNodeRequest {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub input_type: Option<InputType>,
    pub order: Option<i32>,
    // null 表示清除截止日期
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[ts(optional, type = "string | null")]
    pub due_date: Option<Option<NaiveDate>>,
}
