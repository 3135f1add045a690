pub mod list;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::entries::requests::UpsertEntryRequest;
use crate::storage::Storage;

pub struct EntryService {
    storage: Option<Arc<dyn Storage>>,
}

impl EntryService {
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

    // 当前用户在该课程下的全部录入
    pub async fn list_entries(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_entries(self, request, course_id).await
    }

    // 每个 (用户, 节点) 只保留一条录入
    pub async fn upsert_entry(
        &self,
        request: &HttpRequest,
        course_id: i64,
        entry_data: UpsertEntryRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_entry(self, request, course_id, entry_data).await
    }
}
