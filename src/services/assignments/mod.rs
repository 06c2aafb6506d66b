pub mod create;
pub mod detail;
pub mod grade;
pub mod list;
pub mod list_student;
pub mod submissions;
pub mod submit;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::GradeRequest;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 班级作业：教师附带提交数量，学生附带本人状态
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        class_id: String,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, class_id).await
    }

    // 学生所有班级的作业
    pub async fn list_student_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list_student::list_student_assignments(self, request).await
    }

    pub async fn get_assignment(&self, request: &HttpRequest, id: String) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, id).await
    }

    // multipart: classId, topicId, title, description?, dueDate, attachments[]
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, payload).await
    }

    // multipart: comment?, files[]
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        id: String,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, id, payload).await
    }

    pub async fn list_submissions(&self, request: &HttpRequest, id: String) -> ActixResult<HttpResponse> {
        submissions::list_submissions(self, request, id).await
    }

    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: String,
        grade_request: GradeRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, grade_request).await
    }
}
