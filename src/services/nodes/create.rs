use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NodeService;
use crate::config::AppConfig;
use crate::grading::EvaluationTree;
use crate::models::{
    ApiResponse, ErrorCode,
    nodes::{entities::InputType, requests::CreateNodeRequest},
};
use crate::services::common::{
    current_user_id, internal_error, invalidate_course_nodes, load_course_tree,
    load_owned_course,
};
use crate::utils::validate::{validate_name, validate_weight};

pub async fn create_node(
    service: &NodeService,
    request: &HttpRequest,
    course_id: i64,
    node_data: CreateNodeRequest,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_name(&node_data.name).and(validate_weight(node_data.weight)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::NodeCreationFailed,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    let tree = match load_course_tree(&storage, request, course_id).await {
        Ok(tree) => tree,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = check_placement(&tree, node_data.parent_id) {
        return Ok(resp);
    }

    // 分支节点不接受录入
    let node_data = CreateNodeRequest {
        name: node_data.name.trim().to_string(),
        input_type: if node_data.is_leaf {
            node_data.input_type
        } else {
            InputType::None
        },
        ..node_data
    };

    match storage.create_node(course_id, node_data).await {
        Ok(node) => {
            invalidate_course_nodes(request, course_id).await;
            info!(
                "User {} created node {} in course {}",
                uid, node.id, course_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                node,
                "Evaluation node created successfully",
            )))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::NodeCreationFailed,
            "Failed to create evaluation node",
            &e,
        )),
    }
}

/// 校验新节点的位置：父节点必须是本课程的分支节点，且不超过深度和数量上限
fn check_placement(tree: &EvaluationTree, parent_id: Option<i64>) -> Result<(), HttpResponse> {
    let limits = &AppConfig::get().grading;

    if tree.len() >= limits.max_nodes_per_course {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::NodeCreationFailed,
            format!(
                "A course can have at most {} evaluation nodes",
                limits.max_nodes_per_course
            ),
        )));
    }

    let Some(parent_id) = parent_id else {
        return Ok(());
    };

    let parent_is_branch = tree
        .get(parent_id)
        .is_some_and(|parent| !parent.node.is_leaf);
    if !parent_is_branch {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::NodeParentInvalid,
            "Parent must be a non-leaf node of the same course",
        )));
    }

    let depth = tree.depth(parent_id).unwrap_or(0) + 1;
    if depth > limits.max_tree_depth {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::NodeTreeTooDeep,
            format!(
                "Evaluation tree depth must not exceed {}",
                limits.max_tree_depth
            ),
        )));
    }

    Ok(())
}
