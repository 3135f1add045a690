use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::entries::requests::UpsertEntryRequest;
use crate::models::grading::requests::NodeScoreQuery;
use crate::models::nodes::requests::{CreateNodeRequest, UpdateNodeRequest};
use crate::models::thresholds::requests::UpdateThresholdRequest;
use crate::services::{CourseService, EntryService, NodeService, ThresholdService};
use crate::utils::{SafeCourseId, SafeNodeId};

// 懒加载的全局服务实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static NODE_SERVICE: Lazy<NodeService> = Lazy::new(NodeService::new_lazy);
static ENTRY_SERVICE: Lazy<EntryService> = Lazy::new(EntryService::new_lazy);
static THRESHOLD_SERVICE: Lazy<ThresholdService> = Lazy::new(ThresholdService::new_lazy);

// 课程
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseId,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn get_summary(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_summary(&req, course_id.0).await
}

pub async fn get_scores(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_scores(&req, course_id.0).await
}

// 评价节点
pub async fn list_nodes(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    NODE_SERVICE.list_nodes(&req, course_id.0).await
}

pub async fn create_node(
    req: HttpRequest,
    course_id: SafeCourseId,
    node_data: web::Json<CreateNodeRequest>,
) -> ActixResult<HttpResponse> {
    NODE_SERVICE
        .create_node(&req, course_id.0, node_data.into_inner())
        .await
}

pub async fn update_node(
    req: HttpRequest,
    course_id: SafeCourseId,
    node_id: SafeNodeId,
    update_data: web::Json<UpdateNodeRequest>,
) -> ActixResult<HttpResponse> {
    NODE_SERVICE
        .update_node(&req, course_id.0, node_id.0, update_data.into_inner())
        .await
}

pub async fn delete_node(
    req: HttpRequest,
    course_id: SafeCourseId,
    node_id: SafeNodeId,
) -> ActixResult<HttpResponse> {
    NODE_SERVICE.delete_node(&req, course_id.0, node_id.0).await
}

pub async fn get_node_score(
    req: HttpRequest,
    course_id: SafeCourseId,
    node_id: SafeNodeId,
    query: web::Query<NodeScoreQuery>,
) -> ActixResult<HttpResponse> {
    NODE_SERVICE
        .get_node_score(&req, course_id.0, node_id.0, query.mode)
        .await
}

// 成绩录入
pub async fn list_entries(req: HttpRequest, course_id: SafeCourseId) -> ActixResult<HttpResponse> {
    ENTRY_SERVICE.list_entries(&req, course_id.0).await
}

pub async fn upsert_entry(
    req: HttpRequest,
    course_id: SafeCourseId,
    entry_data: web::Json<UpsertEntryRequest>,
) -> ActixResult<HttpResponse> {
    ENTRY_SERVICE
        .upsert_entry(&req, course_id.0, entry_data.into_inner())
        .await
}

// 及格线
pub async fn get_threshold(
    req: HttpRequest,
    course_id: SafeCourseId,
) -> ActixResult<HttpResponse> {
    THRESHOLD_SERVICE.get_threshold(&req, course_id.0).await
}

pub async fn update_threshold(
    req: HttpRequest,
    course_id: SafeCourseId,
    threshold_data: web::Json<UpdateThresholdRequest>,
) -> ActixResult<HttpResponse> {
    THRESHOLD_SERVICE
        .update_threshold(&req, course_id.0, threshold_data.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 只能看到和创建自己的课程
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(web::put().to(update_course))
                    .route(web::delete().to(delete_course)),
            )
            .service(
                web::resource("/{course_id}/nodes")
                    .route(web::get().to(list_nodes))
                    .route(web::post().to(create_node)),
            )
            .service(
                // 删除节点会连同子树一起删除
                web::resource("/{course_id}/nodes/{node_id}")
                    .route(web::put().to(update_node))
                    .route(web::delete().to(delete_node)),
            )
            .service(
                web::resource("/{course_id}/nodes/{node_id}/score")
                    .route(web::get().to(get_node_score)),
            )
            .service(web::resource("/{course_id}/scores").route(web::get().to(get_scores)))
            .service(
                web::resource("/{course_id}/entries")
                    .route(web::get().to(list_entries))
                    .route(web::post().to(upsert_entry)),
            )
            .service(
                web::resource("/{course_id}/threshold")
                    .route(web::get().to(get_threshold))
                    .route(web::put().to(update_threshold)),
            )
            .service(web::resource("/{course_id}/summary").route(web::get().to(get_summary))),
    );
}
