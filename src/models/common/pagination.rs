use serde::{Deserialize, Serialize};
use ts_rs::TS;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_SIZE: i64 = 20;
const MAX_SIZE: i64 = 100;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_lenient_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_lenient_i64")]
    pub size: i64,
}

impl PaginationQuery {
    /// 归一化到合法区间，返回 (page, size)
    pub fn normalized(&self) -> (u64, u64) {
        (
            self.page.max(1) as u64,
            self.size.clamp(1, MAX_SIZE) as u64,
        )
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 查询字符串中的数字总是以字符串形式到达（flatten 时尤其如此）
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientI64 {
    Int(i64),
    Str(String),
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match LenientI64::deserialize(deserializer)? {
        LenientI64::Int(value) => Ok(value),
        LenientI64::Str(value) => value.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expected an integer, got '{value}'"))
        }),
    }
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_SIZE
}
