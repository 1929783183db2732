use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::access::{Operation, Target, authorize};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::catalog::entities::Course;
use crate::models::catalog::requests::{CourseListParams, CourseListQuery, CreateCourseRequest};
use crate::models::catalog::responses::{CourseDetailResponse, CourseView};
use crate::models::users::entities::{User, UserRole};
use crate::models::{PaginatedResponse, Redirect, locations};
use crate::services::outcome::{Outcome, data_response, error_response, redirect_response};
use crate::services::views::{course_view, course_views, load_course};
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, validate_code, validate_name};

/// 课程列表：学生看已选课程，教师看讲授课程，管理员看全部
pub async fn list_courses(
    storage: &dyn Storage,
    principal: &User,
    params: CourseListParams,
) -> Result<PaginatedResponse<CourseView>> {
    let (page, size) = AppConfig::get()
        .clamp_pagination(Some(params.pagination.page), Some(params.pagination.size));

    let mut query = CourseListQuery {
        page,
        size,
        search: params.search.filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };
    match principal.role {
        UserRole::Student => query.student_id = Some(principal.id),
        UserRole::Lecturer => query.lecturer_id = Some(principal.id),
        UserRole::Admin => {}
    }

    let courses = storage.list_courses_with_pagination(query).await?;
    let items = course_views(storage, courses.items).await?;
    Ok(PaginatedResponse {
        items,
        pagination: courses.pagination,
    })
}

/// 新建课程（管理员），授课人必须是教师
pub async fn create_course(
    storage: &dyn Storage,
    principal: &User,
    mut req: CreateCourseRequest,
) -> Result<Outcome<Course>> {
    authorize(principal, Operation::ManageCatalog, Target::Global)?;

    req.code = req.code.trim().to_string();
    req.name = req.name.trim().to_string();
    req.description = req
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let mut errors = FieldErrors::new();
    errors.check("code", validate_code(&req.code));
    errors.check("name", validate_name(&req.name));
    if storage.get_department_by_id(req.department_id).await?.is_none() {
        errors.add("department_id", "Select a valid department.");
    }
    match storage.get_user_by_id(req.lecturer_id).await? {
        Some(user) if user.is_lecturer() => {}
        _ => errors.add("lecturer_id", "Select a valid lecturer."),
    }
    if errors.is_empty() && storage.get_course_by_code(&req.code).await?.is_some() {
        errors.add("code", "Course with this code already exists.");
    }
    errors.into_result()?;

    let course = storage.create_course(req).await?;
    tracing::info!(
        "Admin {} created course {} for lecturer {}",
        principal.username,
        course.code,
        course.lecturer_id
    );

    let redirect = Redirect::success(
        locations::course_detail(course.id),
        format!("Course {} created successfully.", course.code),
    );
    Ok(Outcome::new(course, redirect))
}

/// 课程详情，附带作业与选课人数
pub async fn course_detail(storage: &dyn Storage, course_id: i64) -> Result<CourseDetailResponse> {
    let course = load_course(storage, course_id).await?;
    let assignments = storage.list_assignments_by_course(course.id).await?;
    let enrolled_count = storage.count_enrollments_by_course(course.id).await?;

    Ok(CourseDetailResponse {
        course: course_view(storage, course).await?,
        assignments,
        enrolled_count,
    })
}

pub async fn handle_list_courses(
    service: &CatalogService,
    principal: Principal,
    query: CourseListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        list_courses(storage.as_ref(), &principal, query).await,
        "Courses retrieved successfully",
    ))
}

pub async fn handle_create_course(
    service: &CatalogService,
    principal: Principal,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        create_course(storage.as_ref(), &principal, course_data).await,
    ))
}

pub async fn handle_course_detail(
    service: &CatalogService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        course_detail(storage.as_ref(), course_id).await,
        "Course retrieved successfully",
    ))
}
