pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::thresholds::requests::UpdateThresholdRequest;
use crate::storage::Storage;

pub struct ThresholdService {
    storage: Option<Arc<dyn Storage>>,
}

impl ThresholdService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 读取及格线，不存在时以默认值创建
    pub async fn get_threshold(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_threshold(self, request, course_id).await
    }

    pub async fn update_threshold(
        &self,
        request: &HttpRequest,
        course_id: i64,
        threshold_data: UpdateThresholdRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_threshold(self, request, course_id, threshold_data).await
    }
}
