use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ThresholdService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user_id, internal_error, load_owned_course};

pub async fn get_threshold(
    service: &ThresholdService,
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

    match storage.ensure_threshold(course_id).await {
        Ok(threshold) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            threshold,
            "Threshold retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::ThresholdSaveFailed,
            "Failed to load threshold",
            &e,
        )),
    }
}
