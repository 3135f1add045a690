use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 计分模式：对尚未完成的叶子节点的乐观程度
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub enum ScoreMode {
    /// 只看已完成的部分，全部未完成则为缺省
    Current,
    /// 未完成按 0 计
    #[default]
    Predicted,
    /// 未完成按满分计
    Max,
}

impl std::fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreMode::Current => write!(f, "current"),
            ScoreMode::Predicted => write!(f, "predicted"),
            ScoreMode::Max => write!(f, "max"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct NodeScoreQuery {
    #[serde(default)]
    pub mode: ScoreMode,
}
