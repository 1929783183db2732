pub mod courses;
pub mod enrollments;
pub mod schools;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::catalog::requests::{
    CourseListParams, CreateCourseRequest, CreateDepartmentRequest, CreateSchoolRequest,
    DepartmentListParams, EnrollStudentRequest,
};
use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
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

    // 学院列表
    pub async fn list_schools(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        schools::handle_list_schools(self, request).await
    }

    pub async fn create_school(
        &self,
        principal: Principal,
        school_data: CreateSchoolRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schools::handle_create_school(self, principal, school_data, request).await
    }

    // 系列表，可按学院过滤
    pub async fn list_departments(
        &self,
        query: DepartmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schools::handle_list_departments(self, query, request).await
    }

    pub async fn create_department(
        &self,
        principal: Principal,
        department_data: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schools::handle_create_department(self, principal, department_data, request).await
    }

    // 课程列表
    pub async fn list_courses(
        &self,
        principal: Principal,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        courses::handle_list_courses(self, principal, query, request).await
    }

    pub async fn create_course(
        &self,
        principal: Principal,
        course_data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        courses::handle_create_course(self, principal, course_data, request).await
    }

    // 课程详情
    pub async fn get_course(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        courses::handle_course_detail(self, course_id, request).await
    }

    // 选课
    pub async fn enroll_student(
        &self,
        principal: Principal,
        course_id: i64,
        enroll_data: EnrollStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::handle_enroll(self, principal, course_id, enroll_data, request).await
    }

    // 退课
    pub async fn unenroll_student(
        &self,
        principal: Principal,
        course_id: i64,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::handle_unenroll(self, principal, course_id, student_id, request).await
    }
}
