use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NodeService, load_course_node};
use crate::models::{
    ApiResponse, ErrorCode,
    nodes::{entities::InputType, requests::UpdateNodeRequest},
};
use crate::services::common::{
    current_user_id, internal_error, invalidate_course_nodes, load_owned_course,
};
use crate::utils::validate::{validate_name, validate_weight};

pub async fn update_node(
    service: &NodeService,
    request: &HttpRequest,
    course_id: i64,
    node_id: i64,
    update_data: UpdateNodeRequest,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    let node = match load_course_node(&storage, course_id, node_id).await {
        Ok(node) => node,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_update(&update_data, node.is_leaf) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::NodeUpdateFailed,
            msg,
        )));
    }

    let update_data = UpdateNodeRequest {
        name: update_data.name.map(|name| name.trim().to_string()),
        ..update_data
    };

    match storage.update_node(node_id, update_data).await {
        Ok(Some(node)) => {
            invalidate_course_nodes(request, course_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                node,
                "Evaluation node updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NodeNotFound,
            "Evaluation node not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::NodeUpdateFailed,
            "Failed to update evaluation node",
            &e,
        )),
    }
}

fn validate_update(update: &UpdateNodeRequest, is_leaf: bool) -> Result<(), &'static str> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(weight) = update.weight {
        validate_weight(weight)?;
    }
    if !is_leaf && update.input_type.is_some_and(|t| t != InputType::None) {
        return Err("Branch nodes cannot have an input type");
    }
    Ok(())
}
