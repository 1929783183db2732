use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access::{Operation, Target, authorize};
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::GradeRequest;
use crate::models::users::entities::User;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, error_response, redirect_response};
use crate::services::views::{load_assignment, load_course, load_submission};
use crate::storage::Storage;

/// 授课教师评分，分数、评语、评分人与评分时间在同一次更新中写入
pub async fn grade(
    storage: &dyn Storage,
    principal: &User,
    submission_id: i64,
    req: GradeRequest,
) -> Result<Outcome<Submission>> {
    let submission = load_submission(storage, submission_id).await?;
    let assignment = load_assignment(storage, submission.assignment_id).await?;
    let course = load_course(storage, assignment.course_id).await?;
    authorize(
        principal,
        Operation::GradeSubmission { submission_id },
        Target::Submission {
            owner_id: submission.student_id,
            course: &course,
        },
    )?;

    let update = submission.grade(
        assignment.total_marks,
        req.marks,
        req.feedback.trim(),
        principal.id,
        chrono::Utc::now(),
    )?;
    let graded = storage
        .apply_grade(update)
        .await?
        .ok_or_else(|| CourseSystemError::not_found("Submission not found"))?;

    tracing::info!(
        "Lecturer {} graded submission {} with {:?}/{}",
        principal.username,
        graded.id,
        graded.marks,
        assignment.total_marks
    );

    let redirect = Redirect::success(
        locations::submission_detail(graded.id),
        "Submission graded successfully.",
    );
    Ok(Outcome::new(graded, redirect))
}

pub async fn handle_grade(
    service: &SubmissionService,
    principal: Principal,
    submission_id: i64,
    grade_data: GradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(redirect_response(
        grade(storage.as_ref(), &principal, submission_id, grade_data).await,
    ))
}
