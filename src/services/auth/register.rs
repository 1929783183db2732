use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, Session, session_response};
use crate::errors::{CourseSystemError, Result};
use crate::models::Redirect;
use crate::models::auth::requests::RegisterRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::services::outcome::error_response;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    FieldErrors, validate_email, validate_password_simple, validate_username,
};

fn parse_registrable_role(role: &str) -> std::result::Result<UserRole, String> {
    role.trim()
        .parse::<UserRole>()
        .ok()
        .filter(|r| UserRole::registrable_roles().contains(r))
        .ok_or_else(|| {
            format!("Select a valid choice. {role} is not one of the available choices.")
        })
}

/// 注册学生或教师账号，成功后直接登录
pub async fn register(storage: &dyn Storage, register_request: RegisterRequest) -> Result<Session> {
    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_lowercase();

    let mut errors = FieldErrors::new();
    errors.check("username", validate_username(&username));
    errors.check("email", validate_email(&email));
    errors.check(
        "password",
        validate_password_simple(&register_request.password),
    );
    if register_request.password != register_request.password_confirm {
        errors.add("password_confirm", "The two password fields didn't match.");
    }
    let role = parse_registrable_role(&register_request.role);
    if let Err(msg) = &role {
        errors.add("role", msg.clone());
    }

    // 检查用户名与邮箱是否已被占用
    if storage.get_user_by_username(&username).await?.is_some() {
        errors.add("username", "A user with that username already exists.");
    }
    if storage.get_user_by_email(&email).await?.is_some() {
        errors.add("email", "A user with that email already exists.");
    }
    errors.into_result()?;

    let role = role.map_err(CourseSystemError::validation)?;

    let display_name = register_request
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let user = storage
        .create_user(NewUser {
            username,
            email,
            password_hash: hash_password(&register_request.password)?,
            role,
            display_name,
        })
        .await?;

    tracing::info!("New {} account registered: {}", user.role, user.username);

    let refresh_expiry = JwtUtils::refresh_token_expiry(false);
    let tokens = user.generate_token_pair(Some(refresh_expiry))?;
    let redirect = Redirect::success(
        user.dashboard_location(),
        format!("Welcome, {}! Your account has been created.", user.full_name()),
    );

    Ok(Session {
        user,
        tokens,
        refresh_expiry,
        redirect,
    })
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(match register(storage.as_ref(), register_request).await {
        Ok(session) => session_response(session, "Registration successful"),
        Err(e) => error_response(&e),
    })
}
