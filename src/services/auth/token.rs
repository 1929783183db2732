use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::ApiResponse;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::users::responses::UserResponse;
use crate::services::outcome::error_response;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

/// 用 refresh token 换取新的 access token
pub async fn refresh(
    storage: &dyn Storage,
    refresh_token: Option<&str>,
) -> Result<RefreshTokenResponse> {
    let refresh_token = refresh_token
        .ok_or_else(|| CourseSystemError::token("Unauthorized access, please login"))?;
    let claims = JwtUtils::verify_refresh_token(refresh_token)?;

    let user = storage
        .get_user_by_id(claims.user_id()?)
        .await?
        .filter(|user| user.is_active())
        .ok_or_else(|| {
            CourseSystemError::token("Login expired or invalid, please login again")
        })?;

    Ok(RefreshTokenResponse {
        access_token: JwtUtils::generate_access_token(user.id, user.role.as_str())?,
        expires_in: JwtUtils::access_token_expires_in(),
    })
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    // 从 cookie 中提取 refresh token
    let refresh_token = JwtUtils::extract_refresh_token_from_cookie(request);
    Ok(
        match refresh(storage.as_ref(), refresh_token.as_deref()).await {
            Ok(response) => HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )),
            Err(e) => {
                tracing::info!("Refresh token failed: {}", e);
                error_response(&e)
            }
        },
    )
}

pub async fn handle_me(principal: Principal) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse {
            user: principal.into_inner(),
        },
        "User information retrieved successfully",
    )))
}
