use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::access::{Operation, Target, authorize};
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::dashboard::responses::{CourseStats, DashboardTotals, LecturerDashboardResponse};
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::users::entities::User;
use crate::services::outcome::{data_response, error_response};
use crate::services::views::{departments_by_id, submission_items};
use crate::storage::{Storage, SubmissionListQuery};

const RECENT_SUBMISSIONS: u64 = 10;

/// 教师仪表盘：每门课程的统计、最近的待评分提交以及汇总
pub async fn lecturer_dashboard(
    storage: &dyn Storage,
    principal: &User,
) -> Result<LecturerDashboardResponse> {
    authorize(principal, Operation::ViewLecturerDashboard, Target::Global)?;

    let courses = storage.list_courses_by_lecturer(principal.id).await?;
    let departments =
        departments_by_id(storage, courses.iter().map(|c| c.department_id).collect()).await?;

    let mut stats = Vec::with_capacity(courses.len());
    for course in courses {
        let counts = storage.get_course_counts(course.id).await?;
        let department = departments.get(&course.department_id).cloned().ok_or_else(|| {
            CourseSystemError::database_operation(format!(
                "关联的系不存在: {}",
                course.department_id
            ))
        })?;
        stats.push(CourseStats {
            course,
            department,
            counts,
        });
    }

    let recent = storage
        .list_submissions(SubmissionListQuery {
            lecturer_id: Some(principal.id),
            status: Some(SubmissionStatus::Submitted),
            newest_first: true,
            limit: Some(RECENT_SUBMISSIONS),
            ..Default::default()
        })
        .await?;

    Ok(LecturerDashboardResponse {
        totals: DashboardTotals::from_courses(&stats),
        courses: stats,
        recent_submissions: submission_items(storage, recent).await?,
    })
}

pub async fn handle_lecturer_dashboard(
    service: &DashboardService,
    principal: Principal,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        lecturer_dashboard(storage.as_ref(), &principal).await,
        "Dashboard retrieved successfully",
    ))
}
