use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::access::{Operation, Target, authorize};
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::catalog::responses::EnrollmentView;
use crate::models::dashboard::responses::StudentDashboardResponse;
use crate::models::users::entities::User;
use crate::services::outcome::{data_response, error_response};
use crate::services::views::{assignment_views, course_views, submission_items};
use crate::storage::{Storage, SubmissionListQuery};

const RECENT_SUBMISSIONS: u64 = 5;

/// 学生仪表盘：选课、待完成作业与最近提交
pub async fn student_dashboard(
    storage: &dyn Storage,
    principal: &User,
) -> Result<StudentDashboardResponse> {
    authorize(principal, Operation::ViewStudentDashboard, Target::Global)?;

    let enrollments = storage.list_enrollments_by_student(principal.id).await?;
    let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();
    let courses = course_views(storage, storage.get_courses_by_ids(&course_ids).await?).await?;
    let enrollments = enrollments
        .into_iter()
        .filter_map(|enrollment| {
            courses
                .iter()
                .find(|view| view.course.id == enrollment.course_id)
                .cloned()
                .map(|course| EnrollmentView { enrollment, course })
        })
        .collect();

    // 截止时间未到且尚未提交（任何状态都算已提交）
    let pending = storage
        .list_pending_assignments(principal.id, chrono::Utc::now())
        .await?;
    let pending_assignments = assignment_views(storage, pending).await?;

    let recent = storage
        .list_submissions(SubmissionListQuery {
            student_id: Some(principal.id),
            newest_first: true,
            limit: Some(RECENT_SUBMISSIONS),
            ..Default::default()
        })
        .await?;
    let recent_submissions = submission_items(storage, recent).await?;

    Ok(StudentDashboardResponse {
        enrollments,
        pending_assignments,
        recent_submissions,
    })
}

pub async fn handle_student_dashboard(
    service: &DashboardService,
    principal: Principal,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        student_dashboard(storage.as_ref(), &principal).await,
        "Dashboard retrieved successfully",
    ))
}
