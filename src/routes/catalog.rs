use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, Principal};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::catalog::requests::{
    CourseListParams, CreateCourseRequest, CreateDepartmentRequest, CreateSchoolRequest,
    DepartmentListParams, EnrollStudentRequest,
};
use crate::services::{AssignmentService, CatalogService};

// 懒加载的全局 CatalogService 实例
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_schools(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_schools(&req).await
}

pub async fn create_school(
    req: HttpRequest,
    principal: Principal,
    school_data: web::Json<CreateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_school(principal, school_data.into_inner(), &req)
        .await
}

pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .list_departments(query.into_inner(), &req)
        .await
}

pub async fn create_department(
    req: HttpRequest,
    principal: Principal,
    department_data: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_department(principal, department_data.into_inner(), &req)
        .await
}

pub async fn list_courses(
    req: HttpRequest,
    principal: Principal,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .list_courses(principal, query.into_inner(), &req)
        .await
}

pub async fn create_course(
    req: HttpRequest,
    principal: Principal,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_course(principal, course_data.into_inner(), &req)
        .await
}

pub async fn get_course(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_course(path.into_inner(), &req).await
}

pub async fn enroll_student(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .enroll_student(principal, path.into_inner(), enroll_data.into_inner(), &req)
        .await
}

pub async fn unenroll_student(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (course_id, student_id) = path.into_inner();
    CATALOG_SERVICE
        .unenroll_student(principal, course_id, student_id, &req)
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(principal, path.into_inner(), assignment_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_schools))
                    .route(web::post().to(create_school)),
            ),
    )
    .service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_departments))
                    .route(web::post().to(create_department)),
            ),
    )
    .service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(web::resource("/{course_id}").route(web::get().to(get_course)))
            .service(
                web::resource("/{course_id}/enrollments").route(web::post().to(enroll_student)),
            )
            .service(
                web::resource("/{course_id}/enrollments/{student_id}")
                    .route(web::delete().to(unenroll_student)),
            )
            .service(
                web::resource("/{course_id}/assignments")
                    .route(web::post().to(create_assignment)),
            ),
    );
}
