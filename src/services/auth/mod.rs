pub mod login;
pub mod profile;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::Redirect;
use crate::models::auth::requests::{LoginRequest, RegisterRequest};
use crate::models::users::entities::User;
use crate::models::users::requests::UpdateProfileRequest;
use crate::storage::Storage;
use crate::utils::jwt::TokenPair;

/// 登录或注册后建立的会话
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub tokens: TokenPair,
    pub refresh_expiry: chrono::Duration,
    pub redirect: Redirect,
}

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        if let Some(storage) = &self.storage {
            return Ok(storage.clone());
        }
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| CourseSystemError::database_config("Storage not found in app data"))
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 用户注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 当前用户
    pub async fn me(&self, principal: Principal) -> ActixResult<HttpResponse> {
        token::handle_me(principal).await
    }

    // 个人资料
    pub async fn profile(
        &self,
        principal: Principal,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_profile(self, principal, request).await
    }

    // 更新个人资料
    pub async fn update_profile(
        &self,
        principal: Principal,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, principal, update_request, request).await
    }
}

// 登录与注册共用的会话响应
pub(crate) fn session_response(session: Session, message: &str) -> HttpResponse {
    let refresh_cookie = crate::utils::jwt::JwtUtils::create_refresh_token_cookie(
        &session.tokens.refresh_token,
        session.refresh_expiry,
    );
    let response = crate::models::auth::responses::SessionResponse {
        access_token: session.tokens.access_token,
        expires_in: crate::utils::jwt::JwtUtils::access_token_expires_in(),
        user: session.user,
        redirect: session.redirect,
    };
    HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(crate::models::ApiResponse::success(response, message))
}
