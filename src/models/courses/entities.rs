use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 开课学期
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseTerm {
    Early, // 前期
    Late,  // 后期
    #[default]
    FullYear, // 通年
}

impl CourseTerm {
    pub const EARLY: &'static str = "early";
    pub const LATE: &'static str = "late";
    pub const FULL_YEAR: &'static str = "full_year";
}

impl std::fmt::Display for CourseTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseTerm::Early => write!(f, "{}", CourseTerm::EARLY),
            CourseTerm::Late => write!(f, "{}", CourseTerm::LATE),
            CourseTerm::FullYear => write!(f, "{}", CourseTerm::FULL_YEAR),
        }
    }
}

impl std::str::FromStr for CourseTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CourseTerm::EARLY => Ok(CourseTerm::Early),
            CourseTerm::LATE => Ok(CourseTerm::Late),
            CourseTerm::FULL_YEAR => Ok(CourseTerm::FullYear),
            _ => Err(format!("Invalid course term: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 所有者（创建者）用户ID
    pub owner_id: i64,
    // 课程名称
    pub name: String,
    // 开课年份
    pub year: i32,
    // 开课学期
    pub term: CourseTerm,
    // 是否必修
    pub is_required: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}
