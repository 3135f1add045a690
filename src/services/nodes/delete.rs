use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{NodeService, load_course_node};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user_id, internal_error, invalidate_course_nodes, load_owned_course,
};

pub async fn delete_node(
    service: &NodeService,
    request: &HttpRequest,
    course_id: i64,
    node_id: i64,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }
    if let Err(resp) = load_course_node(&storage, course_id, node_id).await {
        return Ok(resp);
    }

    match storage.delete_node(node_id).await {
        Ok(true) => {
            invalidate_course_nodes(request, course_id).await;
            info!(
                "User {} deleted node {} of course {}",
                uid, node_id, course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Evaluation node deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NodeNotFound,
            "Evaluation node not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::NodeDeleteFailed,
            "Failed to delete evaluation node",
            &e,
        )),
    }
}
