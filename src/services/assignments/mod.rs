pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 作业列表
    pub async fn list_assignments(
        &self,
        principal: Principal,
        query: AssignmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_assignments(self, principal, query, request).await
    }

    // 在课程下创建作业
    pub async fn create_assignment(
        &self,
        principal: Principal,
        course_id: i64,
        assignment_data: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_assignment(self, principal, course_id, assignment_data, request)
            .await
    }

    // 作业详情
    pub async fn get_assignment(
        &self,
        principal: Principal,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_assignment_detail(self, principal, assignment_id, request).await
    }

    // 更新作业
    pub async fn update_assignment(
        &self,
        principal: Principal,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_assignment(self, principal, assignment_id, update_data, request)
            .await
    }

    // 删除作业及其提交
    pub async fn delete_assignment(
        &self,
        principal: Principal,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_assignment(self, principal, assignment_id, request).await
    }
}
