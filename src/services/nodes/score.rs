use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NodeService;
use crate::grading::Scorer;
use crate::models::{
    ApiResponse, ErrorCode,
    grading::{requests::ScoreMode, responses::NodeScoreResponse},
};
use crate::services::common::{
    current_user_id, internal_error, load_course_tree, load_owned_course,
};

pub async fn get_node_score(
    service: &NodeService,
    request: &HttpRequest,
    course_id: i64,
    node_id: i64,
    mode: ScoreMode,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    let tree = match load_course_tree(&storage, request, course_id).await {
        Ok(tree) => tree,
        Err(resp) => return Ok(resp),
    };

    let entries = match storage.list_course_entries(uid, course_id).await {
        Ok(entries) => entries,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to load entries",
                &e,
            ));
        }
    };

    match Scorer::new(&tree, &entries).score_node_by_id(node_id, mode) {
        Some(score) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NodeScoreResponse {
                node_id,
                mode,
                score: score.value(),
            },
            "Node score calculated successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NodeNotFound,
            "Evaluation node not found",
        ))),
    }
}
