pub mod lecturer;
pub mod student;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    pub async fn student(
        &self,
        principal: Principal,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::handle_student_dashboard(self, principal, request).await
    }

    pub async fn lecturer(
        &self,
        principal: Principal,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lecturer::handle_lecturer_dashboard(self, principal, request).await
    }
}
