use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EntryService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user_id, internal_error, load_owned_course};

pub async fn list_entries(
    service: &EntryService,
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

    match storage.list_course_entries(uid, course_id).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entries,
            "Entries retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to retrieve entries",
            &e,
        )),
    }
}
