pub mod create;
pub mod delete;
pub mod list;
pub mod search;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{CreateEnrollmentRequest, StudentSearchQuery};
use crate::storage::Storage;

/// 学生检索返回的最大条数
pub const SEARCH_LIMIT: u64 = 20;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    pub async fn search_students(
        &self,
        request: &HttpRequest,
        query: StudentSearchQuery,
    ) -> ActixResult<HttpResponse> {
        search::search_students(self, request, query).await
    }

    pub async fn list_class_students(
        &self,
        request: &HttpRequest,
        class_id: String,
    ) -> ActixResult<HttpResponse> {
        list::list_class_students(self, request, class_id).await
    }

    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        enrollment_data: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::enroll_student(self, request, enrollment_data).await
    }

    pub async fn unenroll_student(
        &self,
        request: &HttpRequest,
        class_id: String,
        student_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::unenroll_student(self, request, class_id, student_id).await
    }
}
