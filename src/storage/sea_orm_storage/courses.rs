//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::entries::{Column as EntryColumn, Entity as Entries};
use crate::entity::evaluation_nodes::{Column as NodeColumn, Entity as EvaluationNodes};
use crate::entity::thresholds::{Column as ThresholdColumn, Entity as Thresholds};
use crate::errors::{RakutanError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        owner_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            owner_id: Set(owner_id),
            name: Set(req.name),
            year: Set(req.year),
            term: Set(req.term.to_string()),
            is_required: Set(req.is_required),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出某用户的课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Courses::find().filter(Column::OwnerId.eq(query.owner_id));

        if let Some(year) = query.year {
            select = select.filter(Column::Year.eq(year));
        }

        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term.to_string()));
        }

        // 搜索条件（按课程名）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.like(contains_pattern(search.trim())));
        }

        // 新学年在前，同一学年按名称
        select = select
            .order_by_desc(Column::Year)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(year) = update.year {
            model.year = Set(year);
        }

        if let Some(term) = update.term {
            model.term = Set(term.to_string());
        }

        if let Some(is_required) = update.is_required {
            model.is_required = Set(is_required);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| RakutanError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程，在同一事务中清理节点、录入和及格线
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RakutanError::database_operation(format!("开启事务失败: {e}")))?;

        let node_ids: Vec<i64> = EvaluationNodes::find()
            .select_only()
            .column(NodeColumn::Id)
            .filter(NodeColumn::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("查询课程节点失败: {e}")))?;

        if !node_ids.is_empty() {
            Entries::delete_many()
                .filter(EntryColumn::NodeId.is_in(node_ids))
                .exec(&txn)
                .await
                .map_err(|e| RakutanError::database_operation(format!("删除录入失败: {e}")))?;
        }

        EvaluationNodes::delete_many()
            .filter(NodeColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("删除课程节点失败: {e}")))?;

        Thresholds::delete_many()
            .filter(ThresholdColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("删除及格线失败: {e}")))?;

        let result = Courses::delete_by_id(course_id)
            .exec(&txn)
            .await
            .map_err(|e| RakutanError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RakutanError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
