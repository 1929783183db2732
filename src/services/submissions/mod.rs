pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::submissions::requests::{GradeRequest, SubmitRequest};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        if let Some(storage) = &self.storage {
            return Ok(storage.clone());
        }
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| CourseSystemError::database_config("Storage not found in app data"))
    }

    // 提交或重新提交作业
    pub async fn submit(
        &self,
        principal: Principal,
        assignment_id: i64,
        submit_data: SubmitRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, principal, assignment_id, submit_data, request).await
    }

    // 我的提交
    pub async fn list_my_submissions(
        &self,
        principal: Principal,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_my_submissions(self, principal, request).await
    }

    // 待评分的提交
    pub async fn list_pending_submissions(
        &self,
        principal: Principal,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_pending_submissions(self, principal, request).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        principal: Principal,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::handle_submission_detail(self, principal, submission_id, request).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        principal: Principal,
        submission_id: i64,
        grade_data: GradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade(self, principal, submission_id, grade_data, request).await
    }
}
