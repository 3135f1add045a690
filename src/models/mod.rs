//! 数据模型定义
//!
//! 与 entity 模块中的数据库实体分离，这里的类型直接面向 API。

pub mod common;
pub mod courses;
pub mod entries;
pub mod events;
pub mod grading;
pub mod nodes;
pub mod thresholds;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 课程
    CourseNotFound = 2000,
    CourseCreationFailed = 2001,
    CourseUpdateFailed = 2002,
    CourseDeleteFailed = 2003,
    CoursePermissionDenied = 2004,

    // 评价节点
    NodeNotFound = 3000,
    NodeCreationFailed = 3001,
    NodeUpdateFailed = 3002,
    NodeDeleteFailed = 3003,
    NodeParentInvalid = 3004,
    NodeTreeTooDeep = 3005,
    InvalidTree = 3006,

    // 成绩录入
    EntryOnBranchNode = 4000,
    EntryInvalid = 4001,
    EntrySaveFailed = 4002,

    // 及格线
    ThresholdInvalid = 5000,
    ThresholdSaveFailed = 5001,
}
