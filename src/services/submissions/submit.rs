use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access::{Operation, Target, authorize};
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::submissions::requests::SubmitRequest;
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, error_response, redirect_response};
use crate::services::views::load_assignment;
use crate::storage::Storage;

/// 学生提交作业，已有记录时覆盖内容
pub async fn submit(
    storage: &dyn Storage,
    principal: &User,
    assignment_id: i64,
    req: SubmitRequest,
) -> Result<Outcome<Submission>> {
    authorize(principal, Operation::SubmitAssignment, Target::Global)?;
    let assignment = load_assignment(storage, assignment_id).await?;

    let existing = storage.get_submission(assignment.id, principal.id).await?;
    let resubmission = existing
        .as_ref()
        .is_some_and(|s| s.status == SubmissionStatus::Submitted);
    let update = Submission::save_content(
        existing.as_ref(),
        assignment.id,
        principal.id,
        &req.content,
        req.mode,
        chrono::Utc::now(),
    )?;
    let submission = storage.save_submission_content(update).await?;

    tracing::info!(
        "Student {} saved submission {} ({}) for assignment {}",
        principal.username,
        submission.id,
        submission.status.as_str(),
        assignment.id
    );

    let redirect = match submission.status {
        SubmissionStatus::Draft => Redirect::success(
            locations::assignment_detail(assignment.id),
            "Draft saved successfully.",
        ),
        _ if resubmission => Redirect::success(
            locations::MY_SUBMISSIONS,
            "Assignment resubmitted successfully!",
        ),
        _ => Redirect::success(locations::MY_SUBMISSIONS, "Assignment submitted successfully!"),
    };
    Ok(Outcome::new(submission, redirect))
}

pub async fn handle_submit(
    service: &SubmissionService,
    principal: Principal,
    assignment_id: i64,
    submit_data: SubmitRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        submit(storage.as_ref(), &principal, assignment_id, submit_data).await,
    ))
}
