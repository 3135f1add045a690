use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::EntryService;
use crate::models::{ApiResponse, ErrorCode, entries::requests::UpsertEntryRequest};
use crate::services::common::{current_user_id, internal_error, load_owned_course};
use crate::services::nodes::load_course_node;
use crate::utils::validate::validate_entry;

pub async fn upsert_entry(
    service: &EntryService,
    request: &HttpRequest,
    course_id: i64,
    entry_data: UpsertEntryRequest,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_entry(&entry_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EntryInvalid,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    let node = match load_course_node(&storage, course_id, entry_data.node_id).await {
        Ok(node) => node,
        Err(resp) => return Ok(resp),
    };

    // 分支节点的得分由子节点聚合，不接受直接录入
    if !node.is_leaf {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EntryOnBranchNode,
            "Entries can only be recorded on leaf nodes",
        )));
    }

    match storage.upsert_entry(uid, entry_data).await {
        Ok(entry) => {
            debug!(
                "User {} saved entry for node {} ({})",
                uid, entry.node_id, entry.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                entry,
                "Entry saved successfully",
            )))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::EntrySaveFailed,
            "Failed to save entry",
            &e,
        )),
    }
}
