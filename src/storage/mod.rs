use std::sync::Arc;

use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    entries::{entities::Entry, requests::UpsertEntryRequest},
    events::responses::CourseEvent,
    nodes::{
        entities::EvaluationNode,
        requests::{CreateNodeRequest, UpdateNodeRequest},
    },
    thresholds::entities::Threshold,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, owner_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出某用户的课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程，连同节点、录入和及格线
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 评价节点管理方法
    // 创建节点
    async fn create_node(&self, course_id: i64, node: CreateNodeRequest)
    -> Result<EvaluationNode>;
    // 通过ID获取节点
    async fn get_node_by_id(&self, node_id: i64) -> Result<Option<EvaluationNode>>;
    // 列出课程的全部节点（扁平）
    async fn list_course_nodes(&self, course_id: i64) -> Result<Vec<EvaluationNode>>;
    // 更新节点
    async fn update_node(
        &self,
        node_id: i64,
        update: UpdateNodeRequest,
    ) -> Result<Option<EvaluationNode>>;
    // 删除节点及其整个子树
    async fn delete_node(&self, node_id: i64) -> Result<bool>;
    // 列出用户所有课程中带截止日期的节点
    async fn list_events(&self, owner_id: i64) -> Result<Vec<CourseEvent>>;

    /// 成绩录入方法
    // 列出用户在某课程下的录入
    async fn list_course_entries(&self, user_id: i64, course_id: i64) -> Result<Vec<Entry>>;
    // 获取单条录入
    async fn get_entry(&self, user_id: i64, node_id: i64) -> Result<Option<Entry>>;
    // 新建或更新录入，省略的字段沿用原值
    async fn upsert_entry(&self, user_id: i64, entry: UpsertEntryRequest) -> Result<Entry>;

    /// 及格线方法
    // 获取及格线，不存在时不创建
    async fn get_threshold(&self, course_id: i64) -> Result<Option<Threshold>>;
    // 确保及格线存在（幂等），返回当前值
    async fn ensure_threshold(&self, course_id: i64) -> Result<Threshold>;
    // 设置及格线
    async fn set_threshold(&self, course_id: i64, value: f64) -> Result<Threshold>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
