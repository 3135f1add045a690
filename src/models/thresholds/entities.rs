use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 未设置及格线时使用的默认值
pub const DEFAULT_THRESHOLD: f64 = 60.0;

// 及格线类型，目前只有针对课程总分的一种
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/threshold.ts")]
pub enum ThresholdType {
    #[default]
    RootOnly,
}

impl std::fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdType::RootOnly => write!(f, "root_only"),
        }
    }
}

impl std::str::FromStr for ThresholdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root_only" => Ok(ThresholdType::RootOnly),
            _ => Err(format!("Invalid threshold type: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/threshold.ts")]
pub struct Threshold {
    pub course_id: i64,
    #[serde(rename = "type")]
    pub threshold_type: ThresholdType,
    pub value: f64,
}
