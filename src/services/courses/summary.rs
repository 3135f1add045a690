use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::CourseService;
use crate::grading::score_all;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user_id, internal_error, load_course_summary, load_course_tree, load_owned_course,
};

pub async fn get_summary(
    service: &CourseService,
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

    match load_course_summary(&storage, request, course_id, uid).await {
        Ok(summary) => {
            debug!(
                "Course {} summary for user {}: predicted {}, max {}",
                course_id, uid, summary.predicted_score, summary.max_score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                summary,
                "Course summary calculated successfully",
            )))
        }
        Err(resp) => Ok(resp),
    }
}

pub async fn get_scores(
    service: &CourseService,
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

    let tree = match load_course_tree(&storage, request, course_id).await {
        Ok(tree) => tree,
        Err(resp) => return Ok(resp),
    };

    match storage.list_course_entries(uid, course_id).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            score_all(&tree, &entries),
            "Node scores calculated successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to load entries",
            &e,
        )),
    }
}
