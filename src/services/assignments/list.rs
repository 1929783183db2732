use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::Principal;
use crate::models::PaginatedResponse;
use crate::models::assignments::requests::{AssignmentListParams, AssignmentListQuery};
use crate::models::assignments::responses::AssignmentView;
use crate::models::users::entities::User;
use crate::services::outcome::{data_response, error_response};
use crate::services::views::assignment_views;
use crate::storage::Storage;

/// 作业列表：学生看已选课程的作业，其他人看自己讲授课程的作业，按截止时间倒序
pub async fn list_assignments(
    storage: &dyn Storage,
    principal: &User,
    params: AssignmentListParams,
) -> Result<PaginatedResponse<AssignmentView>> {
    let (page, size) = AppConfig::get()
        .clamp_pagination(Some(params.pagination.page), Some(params.pagination.size));

    let mut query = AssignmentListQuery {
        page,
        size,
        course_id: params.course_id,
        ..Default::default()
    };
    if principal.is_student() {
        query.student_id = Some(principal.id);
    } else {
        query.lecturer_id = Some(principal.id);
    }

    let assignments = storage.list_assignments_with_pagination(query).await?;
    let items = assignment_views(storage, assignments.items).await?;
    Ok(PaginatedResponse {
        items,
        pagination: assignments.pagination,
    })
}

pub async fn handle_list_assignments(
    service: &AssignmentService,
    principal: Principal,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };
    Ok(data_response(
        list_assignments(storage.as_ref(), &principal, query).await,
        "Assignments retrieved successfully",
    ))
}
