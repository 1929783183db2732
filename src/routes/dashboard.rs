use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, Principal};
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn student_dashboard(req: HttpRequest, principal: Principal) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.student(principal, &req).await
}

pub async fn lecturer_dashboard(
    req: HttpRequest,
    principal: Principal,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.lecturer(principal, &req).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .route("/student", web::get().to(student_dashboard))
            .route("/lecturer", web::get().to(lecturer_dashboard)),
    );
}
