use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, Principal};
use crate::models::assignments::requests::{AssignmentListParams, UpdateAssignmentRequest};
use crate::models::submissions::requests::SubmitRequest;
use crate::services::{AssignmentService, SubmissionService};

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    principal: Principal,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(principal, query.into_inner(), &req)
        .await
}

pub async fn get_assignment(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(principal, path.into_inner(), &req)
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(principal, path.into_inner(), update_data.into_inner(), &req)
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(principal, path.into_inner(), &req)
        .await
}

pub async fn submit_assignment(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
    submit_data: web::Json<SubmitRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(principal, path.into_inner(), submit_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_assignments)))
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            )
            .service(
                web::resource("/{assignment_id}/submit").route(web::post().to(submit_assignment)),
            ),
    );
}
