pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct CareerService {
    storage: Option<Arc<dyn Storage>>,
}

impl CareerService {
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

    pub async fn list_careers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_careers(self, request).await
    }

    pub async fn get_career(&self, request: &HttpRequest, id: String) -> ActixResult<HttpResponse> {
        get::get_career(self, request, id).await
    }
}
