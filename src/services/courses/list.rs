use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join_all;

use super::CourseService;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{
        requests::{CourseListQuery, CourseQueryParams},
        responses::{CourseSummaryListResponse, CourseWithSummary},
    },
};
use crate::services::common::{current_user_id, internal_error, load_course_summary};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let uid = match current_user_id(request) {
        Ok(uid) => uid,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 只能查询自己的课程
    let list_query = CourseListQuery::from_params(uid, query);

    let page = match storage.list_courses_with_pagination(list_query).await {
        Ok(page) => page,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to retrieve course list",
                &e,
            ));
        }
    };

    // 每门课程附带总评
    let summaries = match try_join_all(
        page.items
            .iter()
            .map(|course| load_course_summary(&storage, request, course.id, uid)),
    )
    .await
    {
        Ok(summaries) => summaries,
        Err(resp) => return Ok(resp),
    };

    let items = page
        .items
        .into_iter()
        .zip(summaries)
        .map(|(course, summary)| CourseWithSummary { course, summary })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseSummaryListResponse {
            pagination: page.pagination,
            items,
        },
        "Course list retrieved successfully",
    )))
}
