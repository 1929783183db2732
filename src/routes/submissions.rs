use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, Principal};
use crate::models::submissions::requests::GradeRequest;
use crate::services::SubmissionService;

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn my_submissions(req: HttpRequest, principal: Principal) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_my_submissions(principal, &req).await
}

pub async fn pending_submissions(
    req: HttpRequest,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_pending_submissions(principal, &req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(principal, path.into_inner(), &req)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    principal: Principal,
    path: web::Path<i64>,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(principal, path.into_inner(), grade_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            // 固定路径需要在 /{submission_id} 之前注册
            .route("/my", web::get().to(my_submissions))
            .route("/pending", web::get().to(pending_submissions))
            .route("/{submission_id}", web::get().to(get_submission))
            .route("/{submission_id}/grade", web::post().to(grade_submission)),
    );
}
