mod common;

use rust_course_system::errors::CourseSystemError;
use rust_course_system::models::FlashLevel;
use rust_course_system::models::auth::requests::{LoginRequest, RegisterRequest};
use rust_course_system::models::locations;
use rust_course_system::models::users::entities::UserRole;
use rust_course_system::models::users::requests::{NewUser, UpdateProfileRequest};
use rust_course_system::runtime::lifetime::startup::seed_admin;
use rust_course_system::services::auth::{login, profile, register, token};
use rust_course_system::storage::Storage;
use rust_course_system::utils::jwt::JwtUtils;

fn registration(username: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@uni.edu"),
        password: common::PASSWORD.to_string(),
        password_confirm: common::PASSWORD.to_string(),
        role: role.to_string(),
        display_name: Some("Ada Lovelace".to_string()),
    }
}

fn credentials(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
        remember_me: false,
    }
}

#[tokio::test]
async fn register_logs_in_and_redirects_to_dashboard() {
    let storage = common::storage().await;

    let session = register::register(storage.as_ref(), registration("ada", "student"))
        .await
        .unwrap();
    assert_eq!(session.user.role, UserRole::Student);
    assert_eq!(session.redirect.location, locations::STUDENT_DASHBOARD);
    assert_eq!(session.redirect.level, FlashLevel::Success);
    assert!(JwtUtils::verify_access_token(&session.tokens.access_token).is_ok());

    let session = register::register(storage.as_ref(), registration("grace", "lecturer"))
        .await
        .unwrap();
    assert_eq!(session.redirect.location, locations::LECTURER_DASHBOARD);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let storage = common::storage().await;
    register::register(storage.as_ref(), registration("ada", "student"))
        .await
        .unwrap();

    let err = register::register(storage.as_ref(), registration("ada", "student"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));
    assert!(err.message().contains("username: A user with that username already exists."));
    assert!(err.message().contains("email: A user with that email already exists."));
}

#[tokio::test]
async fn registering_as_admin_is_a_validation_error() {
    let storage = common::storage().await;
    let err = register::register(storage.as_ref(), registration("mallory", "admin"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Validation(_)));
    assert!(err.message().starts_with("role: "));
    assert_eq!(storage.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn registration_reports_every_invalid_field() {
    let storage = common::storage().await;
    let mut req = registration("bad name!", "student");
    req.email = "not-an-email".into();
    req.password = "short".into();
    req.password_confirm = "different".into();

    let err = register::register(storage.as_ref(), req).await.unwrap_err();
    let message = err.message();
    for field in ["username: ", "email: ", "password: ", "password_confirm: "] {
        assert!(message.contains(field), "missing {field} in {message}");
    }
}

#[tokio::test]
async fn login_redirects_by_role_and_stamps_last_login() {
    let storage = common::storage().await;
    let student = common::student(storage.as_ref(), "ada").await;
    common::lecturer(storage.as_ref(), "grace").await;
    common::admin(storage.as_ref()).await;
    assert!(student.last_login.is_none());

    let session = login::login(storage.as_ref(), credentials("ada", common::PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.redirect.location, locations::STUDENT_DASHBOARD);
    assert!(session.user.last_login.is_some());

    // 邮箱同样可以登录
    let session = login::login(storage.as_ref(), credentials("grace@uni.edu", common::PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.redirect.location, locations::LECTURER_DASHBOARD);

    let session = login::login(storage.as_ref(), credentials("root", common::PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.redirect.location, locations::ADMIN_INDEX);
}

#[tokio::test]
async fn login_with_bad_credentials_fails() {
    let storage = common::storage().await;
    common::student(storage.as_ref(), "ada").await;

    let err = login::login(storage.as_ref(), credentials("ada", "Wrong-password1"))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Authentication(_)));

    let err = login::login(storage.as_ref(), credentials("nobody", common::PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Authentication(_)));
}

#[tokio::test]
async fn refresh_issues_a_new_access_token() {
    let storage = common::storage().await;
    let session = register::register(storage.as_ref(), registration("ada", "student"))
        .await
        .unwrap();

    let refreshed = token::refresh(storage.as_ref(), Some(&session.tokens.refresh_token))
        .await
        .unwrap();
    let claims = JwtUtils::verify_access_token(&refreshed.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), session.user.id);

    // access token 不能当作 refresh token 使用
    let err = token::refresh(storage.as_ref(), Some(&session.tokens.access_token))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Token(_)));
    assert!(token::refresh(storage.as_ref(), None).await.is_err());
}

#[tokio::test]
async fn edit_profile_keeps_role_and_enforces_unique_email() {
    let storage = common::storage().await;
    let ada = common::student(storage.as_ref(), "ada").await;
    common::student(storage.as_ref(), "bob").await;

    let err = profile::edit_profile(
        storage.as_ref(),
        &ada,
        UpdateProfileRequest {
            email: Some("bob@uni.edu".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.message().contains("email: A user with that email already exists."));

    let outcome = profile::edit_profile(
        storage.as_ref(),
        &ada,
        UpdateProfileRequest {
            email: Some("ada.lovelace@uni.edu".into()),
            display_name: Some("Ada".into()),
            password: Some("NewSecret99".into()),
            password_confirm: Some("NewSecret99".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome.data.email, "ada.lovelace@uni.edu");
    assert_eq!(outcome.data.display_name.as_deref(), Some("Ada"));
    assert_eq!(outcome.data.role, UserRole::Student);
    assert_eq!(outcome.redirect.location, locations::PROFILE);

    assert!(
        login::login(storage.as_ref(), credentials("ada", "NewSecret99"))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn edit_profile_rejects_mismatched_password() {
    let storage = common::storage().await;
    let ada = common::student(storage.as_ref(), "ada").await;

    let err = profile::edit_profile(
        storage.as_ref(),
        &ada,
        UpdateProfileRequest {
            password: Some("NewSecret99".into()),
            password_confirm: Some("NewSecret98".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.message().contains("password_confirm: "));
}

#[tokio::test]
async fn seed_admin_only_runs_on_empty_database() {
    let storage = common::storage().await;
    seed_admin(storage.as_ref()).await.unwrap();
    let admin = storage.get_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(admin.role, UserRole::Admin);

    seed_admin(storage.as_ref()).await.unwrap();
    assert_eq!(storage.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let storage = common::storage().await;
    let mut request = registration("ada", "student");
    request.email = "Ada@Uni.edu".to_string();
    let registered = register::register(storage.as_ref(), request).await.unwrap();
    assert_eq!(registered.user.email, "ada@uni.edu");

    let session = login::login(storage.as_ref(), credentials("Ada@Uni.edu", common::PASSWORD))
        .await
        .unwrap();
    assert_eq!(session.user.id, registered.user.id);

    // 用户名仍然区分大小写
    let err = login::login(storage.as_ref(), credentials("ADA", common::PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, CourseSystemError::Authentication(_)));
}

#[tokio::test]
async fn duplicate_insert_is_a_validation_error() {
    let storage = common::storage().await;
    let ada = common::student(storage.as_ref(), "ada").await;

    let err = storage
        .create_user(NewUser {
            username: ada.username.clone(),
            email: "other@uni.edu".to_string(),
            password_hash: ada.password_hash.clone(),
            role: UserRole::Student,
            display_name: None,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CourseSystemError::validation("username: A user with that username already exists.")
    );

    let err = storage
        .create_user(NewUser {
            username: "ada2".to_string(),
            email: ada.email.clone(),
            password_hash: ada.password_hash.clone(),
            role: UserRole::Student,
            display_name: None,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CourseSystemError::validation("email: A user with that email already exists.")
    );
}
