//! 各服务共用的请求上下文处理：调用方身份、课程归属、节点列表缓存

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, error};

use crate::cache::{self, ObjectCache};
use crate::errors::RakutanError;
use crate::grading::{EvaluationTree, summarize};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, courses::entities::Course, grading::responses::CourseSummary,
    nodes::entities::EvaluationNode,
};
use crate::storage::Storage;

/// 记录日志并返回 500
pub(crate) fn internal_error(code: ErrorCode, context: &str, err: &RakutanError) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(code, format!("{context}: {err}")))
}

pub(crate) fn current_user_id(request: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_user_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user id",
        ))
    })
}

/// 未配置缓存时返回 None，调用方直接读库
pub(crate) fn get_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 读取课程并校验归属
pub(crate) async fn load_owned_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    uid: i64,
) -> Result<Course, HttpResponse> {
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Err(internal_error(
                ErrorCode::InternalServerError,
                "Failed to get course",
                &e,
            ));
        }
    };

    if !course.is_owned_by(uid) {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have access to this course",
        )));
    }

    Ok(course)
}

/// 读取课程的扁平节点列表，优先走缓存
pub(crate) async fn load_course_nodes(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
) -> Result<Vec<EvaluationNode>, HttpResponse> {
    let cache = get_cache(request);
    let key = cache::course_nodes_key(course_id);

    if let Some(cache) = &cache
        && let Some(nodes) = cache::get_json::<Vec<EvaluationNode>>(cache.as_ref(), &key).await
    {
        debug!("Loaded {} nodes of course {} from cache", nodes.len(), course_id);
        return Ok(nodes);
    }

    let nodes = storage.list_course_nodes(course_id).await.map_err(|e| {
        internal_error(
            ErrorCode::InternalServerError,
            "Failed to load evaluation nodes",
            &e,
        )
    })?;

    if let Some(cache) = &cache {
        cache::insert_json(cache.as_ref(), key, &nodes, 0).await;
    }

    Ok(nodes)
}

/// 读取节点并构建评价树
pub(crate) async fn load_course_tree(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
) -> Result<EvaluationTree, HttpResponse> {
    let nodes = load_course_nodes(storage, request, course_id).await?;

    match EvaluationTree::build(nodes) {
        Ok(tree) => Ok(tree),
        Err(e) => {
            // 缓存里可能是旧数据，下次请求重新读库
            invalidate_course_nodes(request, course_id).await;
            Err(internal_error(
                ErrorCode::InvalidTree,
                "Evaluation tree of this course is corrupted",
                &e,
            ))
        }
    }
}

/// 计算调用方在某课程下的总评
///
/// 及格线不存在时以默认值写入，列表、详情和总评接口得到一致的结果。
pub(crate) async fn load_course_summary(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
    uid: i64,
) -> Result<CourseSummary, HttpResponse> {
    let tree = load_course_tree(storage, request, course_id).await?;

    let entries = storage
        .list_course_entries(uid, course_id)
        .await
        .map_err(|e| {
            internal_error(
                ErrorCode::InternalServerError,
                "Failed to load entries",
                &e,
            )
        })?;

    let threshold = storage.ensure_threshold(course_id).await.map_err(|e| {
        internal_error(
            ErrorCode::ThresholdSaveFailed,
            "Failed to load threshold",
            &e,
        )
    })?;

    Ok(summarize(&tree, &entries, Some(threshold.value)))
}

/// 节点写入或课程删除后调用
pub(crate) async fn invalidate_course_nodes(request: &HttpRequest, course_id: i64) {
    if let Some(cache) = get_cache(request) {
        cache.remove(&cache::course_nodes_key(course_id)).await;
    }
}
