use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::{CourseSystemError, Result};
use crate::middlewares::Principal;
use crate::models::users::entities::User;
use crate::models::users::requests::{UpdateProfileRequest, UserUpdate};
use crate::models::users::responses::ProfileResponse;
use crate::models::{Redirect, locations};
use crate::services::outcome::{Outcome, data_response, error_response, redirect_response};
use crate::services::views::submission_items;
use crate::storage::{Storage, SubmissionListQuery};
use crate::utils::password::hash_password;
use crate::utils::validate::{FieldErrors, validate_email, validate_password_simple};

const RECENT_SUBMISSIONS: u64 = 5;

// 空字符串表示清除该字段
fn optional_text(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let v = v.trim().to_string();
        (!v.is_empty()).then_some(v)
    })
}

/// 个人资料：学生附带最近的提交
pub async fn profile(storage: &dyn Storage, principal: &User) -> Result<ProfileResponse> {
    let recent_submissions = if principal.is_student() {
        let submissions = storage
            .list_submissions(SubmissionListQuery {
                student_id: Some(principal.id),
                newest_first: true,
                limit: Some(RECENT_SUBMISSIONS),
                ..Default::default()
            })
            .await?;
        submission_items(storage, submissions).await?
    } else {
        Vec::new()
    };

    Ok(ProfileResponse {
        user: principal.clone(),
        recent_submissions,
    })
}

/// 编辑个人资料，角色与状态不会被修改
pub async fn edit_profile(
    storage: &dyn Storage,
    principal: &User,
    update_request: UpdateProfileRequest,
) -> Result<Outcome<User>> {
    let mut errors = FieldErrors::new();

    let email = update_request.email.map(|e| e.trim().to_lowercase());
    if let Some(ref email) = email {
        errors.check("email", validate_email(email));
        // 检查邮箱是否已被其他用户使用
        if let Some(existing) = storage.get_user_by_email(email).await?
            && existing.id != principal.id
        {
            errors.add("email", "A user with that email already exists.");
        }
    }

    let password = update_request.password.filter(|p| !p.is_empty());
    if let Some(ref password) = password {
        errors.check("password", validate_password_simple(password));
        if update_request.password_confirm.as_deref() != Some(password.as_str()) {
            errors.add("password_confirm", "The two password fields didn't match.");
        }
    }
    errors.into_result()?;

    let password_hash = match password {
        Some(ref password) => Some(hash_password(password)?),
        None => None,
    };

    let user = storage
        .update_user(
            principal.id,
            UserUpdate {
                email,
                display_name: optional_text(update_request.display_name),
                avatar_url: optional_text(update_request.avatar_url),
                password_hash,
            },
        )
        .await?
        .ok_or_else(|| CourseSystemError::not_found("User not found"))?;

    tracing::info!("User {} updated their profile", user.username);

    Ok(Outcome::new(
        user,
        Redirect::success(locations::PROFILE, "Your profile has been updated."),
    ))
}

pub async fn handle_profile(
    service: &AuthService,
    principal: Principal,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(data_response(
        profile(storage.as_ref(), &principal).await,
        "Profile retrieved successfully",
    ))
}

pub async fn handle_update_profile(
    service: &AuthService,
    principal: Principal,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(redirect_response(
        edit_profile(storage.as_ref(), &principal, update_request).await,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("  ".into())), Some(None));
        assert_eq!(
            optional_text(Some(" Ada ".into())),
            Some(Some("Ada".to_string()))
        );
    }
}
