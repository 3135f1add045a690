use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 叶子节点的录入方式
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/node.ts")]
pub enum InputType {
    Score,      // 得分 / 满分
    Rate,       // 百分比 0-100
    Attendance, // 出席 / 总次数
    #[default]
    None, // 仅用于中间节点
}

impl InputType {
    pub const SCORE: &'static str = "score";
    pub const RATE: &'static str = "rate";
    pub const ATTENDANCE: &'static str = "attendance";
    pub const NONE: &'static str = "none";
}

impl<'de> Deserialize<'de> for InputType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的录入方式: '{s}'. 支持的方式: score, rate, attendance, none"
            ))
        })
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputType::Score => write!(f, "{}", InputType::SCORE),
            InputType::Rate => write!(f, "{}", InputType::RATE),
            InputType::Attendance => write!(f, "{}", InputType::ATTENDANCE),
            InputType::None => write!(f, "{}", InputType::NONE),
        }
    }
}

impl std::str::FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            InputType::SCORE => Ok(InputType::Score),
            InputType::RATE => Ok(InputType::Rate),
            InputType::ATTENDANCE => Ok(InputType::Attendance),
            InputType::NONE => Ok(InputType::None),
            _ => Err(format!("Invalid input type: {s}")),
        }
    }
}

// 评价节点（扁平形式，与数据库一一对应）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/node.ts")]
pub struct EvaluationNode {
    pub id: i64,
    pub course_id: i64,
    // 为空表示顶层节点
    pub parent_id: Option<i64>,
    pub name: String,
    // 在兄弟节点间的相对权重（百分比）
    pub weight: f64,
    pub input_type: InputType,
    pub is_leaf: bool,
    pub order: i32,
    // 仅用于日程视图，不参与计分
    pub due_date: Option<NaiveDate>,
}
