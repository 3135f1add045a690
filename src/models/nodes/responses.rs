use serde::Serialize;
use ts_rs::TS;

use super::entities::EvaluationNode;

/// 嵌套形式的评价节点，子节点按 order 排序
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/node.ts")]
pub struct EvaluationNodeTree {
    #[serde(flatten)]
    #[ts(flatten)]
    pub node: EvaluationNode,
    pub children: Vec<EvaluationNodeTree>,
}
