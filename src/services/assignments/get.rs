use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::assignments::responses::AssignmentDetailResponse;
use crate::models::submissions::responses::SubmissionSummary;
use crate::models::users::entities::User;
use crate::services::outcome::{data_response, error_response};
use crate::services::views::{assignment_views, load_assignment};
use crate::storage::Storage;

/// 作业详情，学生同时看到自己的提交
pub async fn assignment_detail(
    storage: &dyn Storage,
    principal: &User,
    assignment_id: i64,
) -> Result<AssignmentDetailResponse> {
    let assignment = load_assignment(storage, assignment_id).await?;

    let my_submission = if principal.is_student() {
        storage
            .get_submission(assignment.id, principal.id)
            .await?
            .map(|submission| SubmissionSummary::new(submission, &assignment))
    } else {
        None
    };

    let view = assignment_views(storage, vec![assignment])
        .await?
        .pop()
        .ok_or_else(|| CourseSystemError::not_found("Assignment not found"))?;

    Ok(AssignmentDetailResponse {
        assignment: view,
        my_submission,
    })
}

pub async fn handle_assignment_detail(
    service: &AssignmentService,
    principal: Principal,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        assignment_detail(storage.as_ref(), &principal, assignment_id).await,
        "Assignment retrieved successfully",
    ))
}
