use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, courses::responses::CourseWithSummary};
use crate::services::common::{current_user_id, load_course_summary, load_owned_course};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_owned_course(&storage, course_id, uid).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    match load_course_summary(&storage, request, course_id, uid).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseWithSummary { course, summary },
            "Course information retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
