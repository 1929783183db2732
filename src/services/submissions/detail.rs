use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access::{Operation, Target, authorize};
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::submissions::responses::{SubmissionDetailResponse, score_percentage};
use crate::models::users::entities::User;
use crate::services::outcome::{data_response, error_response};
use crate::services::views::{load_assignment, load_course, load_submission, load_user};
use crate::storage::Storage;

/// 提交详情：提交者本人或授课教师可见
pub async fn submission_detail(
    storage: &dyn Storage,
    principal: &User,
    submission_id: i64,
) -> Result<SubmissionDetailResponse> {
    let submission = load_submission(storage, submission_id).await?;
    let assignment = load_assignment(storage, submission.assignment_id).await?;
    let course = load_course(storage, assignment.course_id).await?;
    authorize(
        principal,
        Operation::ViewSubmission,
        Target::Submission {
            owner_id: submission.student_id,
            course: &course,
        },
    )?;

    let student = load_user(storage, submission.student_id).await?.summary();
    let graded_by = match submission.graded_by {
        Some(grader_id) => storage.get_user_by_id(grader_id).await?.map(|u| u.summary()),
        None => None,
    };

    Ok(SubmissionDetailResponse {
        is_late: submission.is_late(&assignment),
        score_percentage: score_percentage(submission.marks, assignment.total_marks),
        submission,
        assignment,
        course,
        student,
        graded_by,
    })
}

pub async fn handle_submission_detail(
    service: &SubmissionService,
    principal: Principal,
    submission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        submission_detail(storage.as_ref(), &principal, submission_id).await,
        "Submission retrieved successfully",
    ))
}
