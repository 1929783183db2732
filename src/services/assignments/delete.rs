use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::access::{Operation, Target, authorize};
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, error_response, redirect_response};
use crate::services::views::{load_assignment, load_course};
use crate::storage::Storage;

/// 授课教师删除作业，同时删除全部提交
pub async fn delete_assignment(
    storage: &dyn Storage,
    principal: &User,
    assignment_id: i64,
) -> Result<Outcome<()>> {
    let assignment = load_assignment(storage, assignment_id).await?;
    let course = load_course(storage, assignment.course_id).await?;
    authorize(
        principal,
        Operation::DeleteAssignment { assignment_id },
        Target::Course(&course),
    )?;

    if !storage.delete_assignment(assignment.id).await? {
        return Err(CourseSystemError::not_found("Assignment not found"));
    }
    tracing::info!(
        "Lecturer {} deleted assignment {} from course {}",
        principal.username,
        assignment.id,
        course.code
    );

    Ok(Outcome::new(
        (),
        Redirect::success(
            locations::course_detail(course.id),
            "Assignment deleted successfully.",
        ),
    ))
}

pub async fn handle_delete_assignment(
    service: &AssignmentService,
    principal: Principal,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        delete_assignment(storage.as_ref(), &principal, assignment_id).await,
    ))
}
