use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::access::{Operation, Target, authorize};
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::catalog::entities::{Department, School};
use crate::models::catalog::requests::{
    CreateDepartmentRequest, CreateSchoolRequest, DepartmentListParams,
};
use crate::models::catalog::responses::{DepartmentListResponse, SchoolListResponse};
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, data_response, error_response, redirect_response};
use crate::storage::Storage;
use crate::utils::validate::{FieldErrors, validate_code, validate_name};

pub async fn list_schools(storage: &dyn Storage) -> Result<SchoolListResponse> {
    Ok(SchoolListResponse {
        items: storage.list_schools().await?,
    })
}

/// 新建学院（管理员）
pub async fn create_school(
    storage: &dyn Storage,
    principal: &User,
    mut req: CreateSchoolRequest,
) -> Result<Outcome<School>> {
    authorize(principal, Operation::ManageCatalog, Target::Global)?;

    req.name = req.name.trim().to_string();
    req.code = req.code.trim().to_string();

    let mut errors = FieldErrors::new();
    errors.check("name", validate_name(&req.name));
    errors.check("code", validate_code(&req.code));
    if errors.is_empty() && storage.find_school_conflict(&req.name, &req.code).await?.is_some() {
        errors.add("code", "School with this name or code already exists.");
    }
    errors.into_result()?;

    let school = storage.create_school(req).await?;
    tracing::info!("Admin {} created school {}", principal.username, school.code);

    let message = format!("School {} created successfully.", school.name);
    Ok(Outcome::new(
        school,
        Redirect::success(locations::SCHOOL_LIST, message),
    ))
}

pub async fn list_departments(
    storage: &dyn Storage,
    query: DepartmentListParams,
) -> Result<DepartmentListResponse> {
    Ok(DepartmentListResponse {
        items: storage.list_departments(query.school_id).await?,
    })
}

/// 新建系（管理员）
pub async fn create_department(
    storage: &dyn Storage,
    principal: &User,
    mut req: CreateDepartmentRequest,
) -> Result<Outcome<Department>> {
    authorize(principal, Operation::ManageCatalog, Target::Global)?;

    req.name = req.name.trim().to_string();
    req.code = req.code.trim().to_string();

    let mut errors = FieldErrors::new();
    errors.check("name", validate_name(&req.name));
    errors.check("code", validate_code(&req.code));
    if storage.get_school_by_id(req.school_id).await?.is_none() {
        errors.add("school_id", "Select a valid school.");
    }
    if errors.is_empty() && storage.get_department_by_code(&req.code).await?.is_some() {
        errors.add("code", "Department with this code already exists.");
    }
    errors.into_result()?;

    let department = storage.create_department(req).await?;
    tracing::info!(
        "Admin {} created department {}",
        principal.username,
        department.code
    );

    let message = format!("Department {} created successfully.", department.name);
    Ok(Outcome::new(
        department,
        Redirect::success(locations::DEPARTMENT_LIST, message),
    ))
}

pub async fn handle_list_schools(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        list_schools(storage.as_ref()).await,
        "Schools retrieved successfully",
    ))
}

pub async fn handle_create_school(
    service: &CatalogService,
    principal: Principal,
    school_data: CreateSchoolRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        create_school(storage.as_ref(), &principal, school_data).await,
    ))
}

pub async fn handle_list_departments(
    service: &CatalogService,
    query: DepartmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        list_departments(storage.as_ref(), query).await,
        "Departments retrieved successfully",
    ))
}

pub async fn handle_create_department(
    service: &CatalogService,
    principal: Principal,
    department_data: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        create_department(storage.as_ref(), &principal, department_data).await,
    ))
}
