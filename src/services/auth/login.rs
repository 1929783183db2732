use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, Session, session_response};
use crate::errors::{CourseSystemError, Result};
use crate::models::Redirect;
use crate::models::auth::requests::LoginRequest;
use crate::services::outcome::error_response;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// 用户名或邮箱加密码登录
pub async fn login(storage: &dyn Storage, login_request: LoginRequest) -> Result<Session> {
    // 1. 根据用户名或邮箱获取用户信息
    let user = storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await?
        .ok_or_else(|| CourseSystemError::authentication(INVALID_CREDENTIALS))?;

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Err(CourseSystemError::authentication(INVALID_CREDENTIALS));
    }
    if !user.is_active() {
        return Err(CourseSystemError::authentication("This account is inactive."));
    }

    // 3. 更新最后登录时间
    storage.update_last_login(user.id).await?;
    let user = storage.get_user_by_id(user.id).await?.unwrap_or(user);

    // 4. 生成令牌对
    let refresh_expiry = JwtUtils::refresh_token_expiry(login_request.remember_me);
    let tokens = user.generate_token_pair(Some(refresh_expiry))?;

    tracing::info!("User {} logged in successfully", user.username);

    let redirect = Redirect::success(
        user.login_location(),
        format!("Welcome back, {}!", user.full_name()),
    );
    Ok(Session {
        user,
        tokens,
        refresh_expiry,
        redirect,
    })
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(match login(storage.as_ref(), login_request).await {
        Ok(session) => session_response(session, "Login successful"),
        Err(e) => error_response(&e),
    })
}
