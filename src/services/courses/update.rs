use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};
use crate::services::common::{current_user_id, internal_error, load_owned_course};
use crate::utils::validate::{validate_name, validate_year};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_course(&storage, course_id, uid).await {
        return Ok(resp);
    }

    if let Err(msg) = validate_update(&update_data) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseUpdateFailed,
            msg,
        )));
    }

    let update_data = UpdateCourseRequest {
        name: update_data.name.map(|name| name.trim().to_string()),
        ..update_data
    };

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::CourseUpdateFailed,
            "Failed to update course",
            &e,
        )),
    }
}

fn validate_update(update: &UpdateCourseRequest) -> Result<(), &'static str> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(year) = update.year {
        validate_year(year)?;
    }
    Ok(())
}
