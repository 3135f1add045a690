pub mod create;
pub mod delete;
pub mod list;
pub mod score;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    grading::requests::ScoreMode,
    nodes::{
        entities::EvaluationNode,
        requests::{CreateNodeRequest, UpdateNodeRequest},
    },
};
use crate::services::common::internal_error;
use crate::storage::Storage;

pub struct NodeService {
    storage: Option<Arc<dyn Storage>>,
}

impl NodeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 课程的评价树（嵌套形式）
    pub async fn list_nodes(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_nodes(self, request, course_id).await
    }

    pub async fn create_node(
        &self,
        request: &HttpRequest,
        course_id: i64,
        node_data: CreateNodeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_node(self, request, course_id, node_data).await
    }

    pub async fn update_node(
        &self,
        request: &HttpRequest,
        course_id: i64,
        node_id: i64,
        update_data: UpdateNodeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_node(self, request, course_id, node_id, update_data).await
    }

    // 删除节点及其子树
    pub async fn delete_node(
        &self,
        request: &HttpRequest,
        course_id: i64,
        node_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_node(self, request, course_id, node_id).await
    }

    pub async fn get_node_score(
        &self,
        request: &HttpRequest,
        course_id: i64,
        node_id: i64,
        mode: ScoreMode,
    ) -> ActixResult<HttpResponse> {
        score::get_node_score(self, request, course_id, node_id, mode).await
    }
}

/// 读取节点并确认它属于该课程
pub(crate) async fn load_course_node(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    node_id: i64,
) -> Result<EvaluationNode, HttpResponse> {
    match storage.get_node_by_id(node_id).await {
        Ok(Some(node)) if node.course_id == course_id => Ok(node),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NodeNotFound,
            "Evaluation node not found",
        ))),
        Err(e) => Err(internal_error(
            ErrorCode::InternalServerError,
            "Failed to get evaluation node",
            &e,
        )),
    }
}
