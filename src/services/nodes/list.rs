use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NodeService;
use crate::models::ApiResponse;
use crate::services::common::{current_user_id, load_course_tree, load_owned_course};

pub async fn list_nodes(
    service: &NodeService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    match load_course_tree(&storage, request, course_id).await {
        Ok(tree) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tree.to_nested(),
            "Evaluation tree retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
