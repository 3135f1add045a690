pub(crate) mod common;

pub mod courses;
pub mod entries;
pub mod events;
pub mod nodes;
pub mod thresholds;

pub use courses::CourseService;
pub use entries::EntryService;
pub use events::EventService;
pub use nodes::NodeService;
pub use thresholds::ThresholdService;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::{HttpMessage, HttpRequest, HttpResponse, test::TestRequest};
    use tempfile::TempDir;

    use crate::config::DatabaseConfig;
    use crate::middlewares::CurrentUser;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    /// 临时 SQLite 存储，`TempDir` 需在测试期间保持存活
    pub async fn temp_storage() -> (TempDir, Arc<dyn Storage>) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: dir
                .path()
                .join("service-test.db")
                .to_string_lossy()
                .into_owned(),
            pool_size: 1,
            timeout: 5,
        };
        let storage = SeaOrmStorage::connect(&config).await.unwrap();
        (dir, Arc::new(storage))
    }

    /// 已通过认证的请求
    pub fn request_as(user_id: i64) -> HttpRequest {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(CurrentUser { id: user_id });
        req
    }

    pub async fn response_json(resp: HttpResponse) -> serde_json::Value {
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}
