use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::common::{current_user_id, internal_error};
use crate::utils::validate::{validate_name, validate_year};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_name(&course_data.name).and(validate_year(course_data.year)) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseCreationFailed,
            msg,
        )));
    }

    let storage = service.get_storage(request);
    let course_data = CreateCourseRequest {
        name: course_data.name.trim().to_string(),
        ..course_data
    };

    match storage.create_course(uid, course_data).await {
        Ok(course) => {
            info!("User {} created course {} ({})", uid, course.id, course.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::CourseCreationFailed,
            "Failed to create course",
            &e,
        )),
    }
}
