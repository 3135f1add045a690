use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::CourseTerm;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub year: Option<i32>,
    pub term: Option<CourseTerm>,
    pub search: Option<String>,
}

// 创建课程请求，所有者由当前登录用户决定
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub year: i32,
    pub term: CourseTerm,
    #[serde(default)]
    pub is_required: bool,
}

// 更新课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub term: Option<CourseTerm>,
    pub is_required: Option<bool>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub owner_id: i64,
    pub pagination: PaginationQuery,
    pub year: Option<i32>,
    pub term: Option<CourseTerm>,
    pub search: Option<String>,
}

impl CourseListQuery {
    pub fn from_params(owner_id: i64, params: CourseQueryParams) -> Self {
        Self {
            owner_id,
            pagination: params.pagination,
            year: params.year,
            term: params.term,
            search: params.search,
        }
    }
}
