use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 录入状态，只有 completed 参与计分
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/entry.ts")]
pub enum EntryStatus {
    #[default]
    Pending,
    Completed,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Pending => write!(f, "pending"),
            EntryStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EntryStatus::Pending),
            "completed" => Ok(EntryStatus::Completed),
            _ => Err(format!("Invalid entry status: {s}")),
        }
    }
}

/// 某个学生对某个叶子节点的录入
///
/// 只有与节点 `input_type` 对应的字段有意义，其余字段计分时忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/entry.ts")]
pub struct Entry {
    pub id: i64,
    pub user_id: i64,
    pub node_id: i64,
    pub earned: Option<f64>,
    pub max: Option<f64>,
    pub rate: Option<f64>,
    pub attended: Option<i32>,
    pub total: Option<i32>,
    // 加减分（0-100 分制），可为负
    pub adjustment: f64,
    pub status: EntryStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Entry {
    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }
}
