use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::requests::ScoreMode;

/// 课程总评
///
/// `current_score` 是已确定的绝对分数（不归一化），
/// `predicted_score` 按已定义权重归一化。两者口径不同是有意为之。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct CourseSummary {
    pub current_score: f64,
    pub predicted_score: f64,
    pub max_score: f64,
    pub deficit: f64,
    pub is_fail_predicted: bool,
    pub is_certain_fail: bool,
    pub threshold: f64,
}

/// 单个节点在某一模式下的得分（0-1），`score` 为空表示缺省
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct NodeScoreResponse {
    pub node_id: i64,
    pub mode: ScoreMode,
    pub score: Option<f64>,
}

/// 单个节点三种模式的得分（0-1）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct NodeScoreView {
    pub node_id: i64,
    pub current: Option<f64>,
    pub predicted: f64,
    pub max: f64,
}
