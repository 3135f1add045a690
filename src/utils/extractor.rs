//! 路径参数提取器
//!
//! 校验路径中的 ID 为正整数，失败时直接返回统一格式的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 解析正整数 ID
pub fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    let parsed = req
                        .match_info()
                        .get($param)
                        .and_then(parse_positive_id);

                    ready(match parsed {
                        Some(id) => Ok($name(id)),
                        None => {
                            let message = concat!("Invalid path parameter: ", $param);
                            Err(InternalError::from_response(
                                message,
                                HttpResponse::BadRequest()
                                    .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
                            )
                            .into())
                        }
                    })
                }
            }
        )*
    };
}

define_safe_id! {
    SafeCourseId => "course_id",
    SafeNodeId => "node_id",
}
