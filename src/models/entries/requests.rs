use serde::Deserialize;
use ts_rs::TS;

use super::entities::EntryStatus;
use crate::models::common::deserialize_patch;

/// 录入（新建或更新）请求
///
/// 省略的字段保持原值，显式 null 清空该字段。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/entry.ts")]
pub struct UpsertEntryRequest {
    pub node_id: i64,
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[ts(optional, type = "number | null")]
    pub earned: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[ts(optional, type = "number | null")]
    pub max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[ts(optional, type = "number | null")]
    pub rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[ts(optional, type = "number | null")]
    pub attended: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    #[ts(optional, type = "number | null")]
    pub total: Option<Option<i32>>,
    pub adjustment: Option<f64>,
    pub status: Option<EntryStatus>,
}
