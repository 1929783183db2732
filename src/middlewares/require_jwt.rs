/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，加载对应用户并
 * 放入请求扩展，处理函数通过 [`Principal`](super::Principal) 取得当前用户。
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件提取并验证JWT令牌
 * 3. 从存储中加载用户，只有 active 状态的用户可以通过
 * 4. 如果令牌无效或缺失，返回401未授权错误
 */

use super::create_error_response;
use crate::models::users::entities;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因，只用于日志和 401 响应的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    MissingBearer,
    InvalidToken,
    StorageUnavailable,
    UnknownUser,
    InactiveAccount,
}

impl AuthFailure {
    fn message(self) -> &'static str {
        match self {
            AuthFailure::MissingBearer => "Authentication credentials were not provided.",
            AuthFailure::InvalidToken => "Given token not valid for any token type.",
            AuthFailure::StorageUnavailable => "Authentication is temporarily unavailable.",
            AuthFailure::UnknownUser => "User not found.",
            AuthFailure::InactiveAccount => "This account is inactive.",
        }
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<entities::User, AuthFailure> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AuthFailure::MissingBearer)?;

    let user_id = JwtUtils::verify_access_token(token)
        .and_then(|claims| claims.user_id())
        .map_err(|err| {
            debug!("access token rejected: {}", err);
            AuthFailure::InvalidToken
        })?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| Arc::clone(data.get_ref()))
        .ok_or(AuthFailure::StorageUnavailable)?;

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AuthFailure::UnknownUser),
        Err(err) => {
            error!("加载认证用户 {} 失败: {}", user_id, err);
            return Err(AuthFailure::StorageUnavailable);
        }
    };

    if user.is_active() {
        Ok(user)
    } else {
        Err(AuthFailure::InactiveAccount)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("{} 认证通过: {} {}", user.username, req.method(), req.path());
                    req.extensions_mut().insert(user);
                    srv.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(failure) => {
                    info!("拒绝未认证请求 {} {}: {:?}", req.method(), req.path(), failure);
                    let response =
                        create_error_response(StatusCode::UNAUTHORIZED, failure.message());
                    Ok(req.into_response(response.map_into_right_body()))
                }
            }
        })
    }
}
