use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access::{Operation, Target, authorize};
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::responses::SubmissionListResponse;
use crate::models::users::entities::User;
use crate::services::outcome::{data_response, error_response};
use crate::services::views::submission_items;
use crate::storage::{Storage, SubmissionListQuery};

/// 学生本人的全部提交，最新的在前
pub async fn my_submissions(
    storage: &dyn Storage,
    principal: &User,
) -> Result<SubmissionListResponse> {
    authorize(principal, Operation::ViewMySubmissions, Target::Global)?;

    let submissions = storage
        .list_submissions(SubmissionListQuery {
            student_id: Some(principal.id),
            newest_first: true,
            ..Default::default()
        })
        .await?;
    Ok(SubmissionListResponse {
        items: submission_items(storage, submissions).await?,
    })
}

/// 教师讲授课程中等待评分的提交，最早提交的在前
pub async fn pending_submissions(
    storage: &dyn Storage,
    principal: &User,
) -> Result<SubmissionListResponse> {
    authorize(principal, Operation::ViewPendingSubmissions, Target::Global)?;

    let submissions = storage
        .list_submissions(SubmissionListQuery {
            lecturer_id: Some(principal.id),
            status: Some(SubmissionStatus::Submitted),
            newest_first: false,
            ..Default::default()
        })
        .await?;
    Ok(SubmissionListResponse {
        items: submission_items(storage, submissions).await?,
    })
}

pub async fn handle_my_submissions(
    service: &SubmissionService,
    principal: Principal,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        my_submissions(storage.as_ref(), &principal).await,
        "Submissions retrieved successfully",
    ))
}

pub async fn handle_pending_submissions(
    service: &SubmissionService,
    principal: Principal,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        pending_submissions(storage.as_ref(), &principal).await,
        "Pending submissions retrieved successfully",
    ))
}
