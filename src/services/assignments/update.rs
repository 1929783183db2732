use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::access::{Operation, Target, authorize};
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, error_response, redirect_response};
use crate::services::views::{load_assignment, load_course};
use crate::storage::{Storage, SubmissionListQuery};

// 已给出的最高分
async fn highest_awarded_mark(storage: &dyn Storage, assignment_id: i64) -> Result<Option<f64>> {
    let submissions = storage
        .list_submissions(SubmissionListQuery {
            assignment_id: Some(assignment_id),
            ..Default::default()
        })
        .await?;
    Ok(submissions
        .iter()
        .filter_map(|s| s.marks)
        .fold(None, |max, m| Some(max.map_or(m, |x: f64| x.max(m)))))
}

/// 授课教师编辑作业
///
/// 总分不能低于已经给出的分数，否则已有成绩会超出范围。
pub async fn update_assignment(
    storage: &dyn Storage,
    principal: &User,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
) -> Result<Outcome<Assignment>> {
    let assignment = load_assignment(storage, assignment_id).await?;
    let course = load_course(storage, assignment.course_id).await?;
    authorize(
        principal,
        Operation::EditAssignment { assignment_id },
        Target::Course(&course),
    )?;

    req.title = req.title.map(|t| t.trim().to_string());
    req.validate()?;

    if let Some(total_marks) = req.total_marks
        && let Some(highest) = highest_awarded_mark(storage, assignment.id).await?
        && highest > total_marks
    {
        return Err(CourseSystemError::validation(format!(
            "total_marks: Total marks cannot be lower than an already awarded mark ({highest})"
        )));
    }

    let updated = storage
        .update_assignment(assignment.id, req)
        .await?
        .ok_or_else(|| CourseSystemError::not_found("Assignment not found"))?;
    tracing::info!(
        "Lecturer {} updated assignment {}",
        principal.username,
        updated.id
    );

    let redirect = Redirect::success(
        locations::assignment_detail(updated.id),
        "Assignment updated successfully.",
    );
    Ok(Outcome::new(updated, redirect))
}

pub async fn handle_update_assignment(
    service: &AssignmentService,
    principal: Principal,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        update_assignment(storage.as_ref(), &principal, assignment_id, update_data).await,
    ))
}
