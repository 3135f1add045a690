use super::entities::Course;
use crate::models::common::PaginationInfo;
use crate::models::grading::responses::CourseSummary;
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应（存储层）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Course>,
}

/// 课程及当前用户在该课程下的总评
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseWithSummary {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub summary: CourseSummary,
}

// 带总评的课程列表，前端按 deficit 排序风险课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseSummaryListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<CourseWithSummary>,
}
