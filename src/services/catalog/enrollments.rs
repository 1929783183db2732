use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::access::{Operation, Target, authorize};
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::catalog::entities::Enrollment;
use crate::models::catalog::requests::EnrollStudentRequest;
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, error_response, redirect_response};
use crate::services::views::{load_course, load_user};
use crate::storage::Storage;

/// 将学生加入课程（管理员或授课教师）
pub async fn enroll_student(
    storage: &dyn Storage,
    principal: &User,
    course_id: i64,
    req: EnrollStudentRequest,
) -> Result<Outcome<Enrollment>> {
    let course = load_course(storage, course_id).await?;
    authorize(principal, Operation::ManageEnrollment, Target::Course(&course))?;

    let student = load_user(storage, req.student_id).await?;
    if !student.is_student() {
        return Err(CourseSystemError::validation(
            "student_id: Only students can be enrolled in a course.",
        ));
    }
    if storage.get_enrollment(student.id, course.id).await?.is_some() {
        return Err(CourseSystemError::validation(
            "student_id: Student is already enrolled in this course.",
        ));
    }

    let enrollment = storage.create_enrollment(student.id, course.id).await?;
    tracing::info!(
        "User {} enrolled student {} in course {}",
        principal.username,
        student.username,
        course.code
    );

    let redirect = Redirect::success(
        locations::course_detail(course.id),
        format!("{} has been enrolled in {}.", student.full_name(), course.code),
    );
    Ok(Outcome::new(enrollment, redirect))
}

/// 将学生移出课程（管理员或授课教师）
pub async fn unenroll_student(
    storage: &dyn Storage,
    principal: &User,
    course_id: i64,
    student_id: i64,
) -> Result<Outcome<()>> {
    let course = load_course(storage, course_id).await?;
    authorize(principal, Operation::ManageEnrollment, Target::Course(&course))?;

    if !storage.delete_enrollment(student_id, course.id).await? {
        return Err(CourseSystemError::not_found("Enrollment not found"));
    }
    tracing::info!(
        "User {} removed student {} from course {}",
        principal.username,
        student_id,
        course.code
    );

    Ok(Outcome::new(
        (),
        Redirect::success(
            locations::course_detail(course.id),
            "Student has been removed from the course.",
        ),
    ))
}

pub async fn handle_enroll(
    service: &CatalogService,
    principal: Principal,
    course_id: i64,
    enroll_data: EnrollStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        enroll_student(storage.as_ref(), &principal, course_id, enroll_data).await,
    ))
}

pub async fn handle_unenroll(
    service: &CatalogService,
    principal: Principal,
    course_id: i64,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        unenroll_student(storage.as_ref(), &principal, course_id, student_id).await,
    ))
}
