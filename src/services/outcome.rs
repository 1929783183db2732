//! 业务结果到 HTTP 响应的映射
//!
//! 查询类操作直接返回数据；变更类操作返回 [`Outcome`]，响应体的 `data`
//! 为重定向指令。

use actix_web::HttpResponse;
use serde::Serialize;
use ts_rs::TS;

use crate::errors::{CourseSystemError, Result};
use crate::models::{ApiResponse, Redirect};

/// 变更操作的结果：产生的数据以及展示层应跳转的位置
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub data: T,
    pub redirect: Redirect,
}

impl<T> Outcome<T> {
    pub fn new(data: T, redirect: Redirect) -> Self {
        Self { data, redirect }
    }
}

/// 错误响应
///
/// 权限错误附带重定向指令；基础设施错误只记录日志，不向客户端暴露细节。
pub fn error_response(err: &CourseSystemError) -> HttpResponse {
    let status = err.status_code();

    if let CourseSystemError::PermissionDenied { message, location } = err {
        return HttpResponse::build(status).json(ApiResponse::error(
            err.error_code(),
            Redirect::error(location.clone(), message.clone()),
            message.clone(),
        ));
    }

    if status.is_server_error() {
        tracing::error!("{}", err.format_simple());
        return HttpResponse::build(status).json(ApiResponse::error_empty(
            err.error_code(),
            "Internal server error",
        ));
    }

    HttpResponse::build(status).json(ApiResponse::error_empty(err.error_code(), err.message()))
}

/// 查询结果：成功时 200 并携带数据
pub fn data_response<T: Serialize + TS>(result: Result<T>, message: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(data, message)),
        Err(err) => error_response(&err),
    }
}

/// 变更结果：成功时 `data` 为重定向指令，提示信息同时作为响应消息
pub fn redirect_response<T>(result: Result<Outcome<T>>) -> HttpResponse {
    match result {
        Ok(outcome) => {
            let message = outcome.redirect.message.clone();
            HttpResponse::Ok().json(ApiResponse::success(outcome.redirect, message))
        }
        Err(err) => error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_permission_denied_carries_redirect() {
        let err = CourseSystemError::permission_denied("Access denied. Students only.", "/");
        let resp = error_response(&err);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body = body_json(resp).await;
        assert_eq!(body["data"]["location"], "/");
        assert_eq!(body["data"]["level"], "error");
        assert_eq!(body["data"]["message"], "Access denied. Students only.");
    }

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let err = CourseSystemError::database_operation("connection refused");
        let resp = error_response(&err);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn test_redirect_response_uses_flash_message() {
        let outcome = Outcome::new((), Redirect::success("/x", "Saved."));
        let resp = redirect_response(Ok(outcome));
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["message"], "Saved.");
        assert_eq!(body["data"]["location"], "/x");
        assert_eq!(body["data"]["level"], "success");
    }
}
