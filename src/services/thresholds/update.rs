use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ThresholdService;
use crate::models::{ApiResponse, ErrorCode, thresholds::requests::UpdateThresholdRequest};
use crate::services::common::{current_user_id, internal_error, load_owned_course};
use crate::utils::validate::validate_threshold;

pub async fn update_threshold(
    service: &ThresholdService,
    request: &HttpRequest,
    course_id: i64,
    threshold_data: UpdateThresholdRequest,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_threshold(threshold_data.value) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ThresholdInvalid,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    match storage.set_threshold(course_id, threshold_data.value).await {
        Ok(threshold) => {
            info!(
                "User {} set threshold of course {} to {}",
                uid, course_id, threshold.value
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                threshold,
                "Threshold updated successfully",
            )))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::ThresholdSaveFailed,
            "Failed to update threshold",
            &e,
        )),
    }
}
