use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::access::{Operation, Target, authorize};
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, error_response, redirect_response};
use crate::services::views::load_course;
use crate::storage::Storage;

/// 授课教师在课程下创建作业
pub async fn create_assignment(
    storage: &dyn Storage,
    principal: &User,
    course_id: i64,
    mut req: CreateAssignmentRequest,
) -> Result<Outcome<Assignment>> {
    let course = load_course(storage, course_id).await?;
    authorize(principal, Operation::CreateAssignment, Target::Course(&course))?;

    req.title = req.title.trim().to_string();
    req.validate()?;

    let assignment = storage
        .create_assignment(course.id, principal.id, req)
        .await?;
    tracing::info!(
        "Lecturer {} created assignment {} in course {}",
        principal.username,
        assignment.id,
        course.code
    );

    let redirect = Redirect::success(
        locations::assignment_detail(assignment.id),
        "Assignment created successfully.",
    );
    Ok(Outcome::new(assignment, redirect))
}

pub async fn handle_create_assignment(
    service: &AssignmentService,
    principal: Principal,
    course_id: i64,
    assignment_data: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        create_assignment(storage.as_ref(), &principal, course_id, assignment_data).await,
    ))
}
