use crate::models::common::Redirect;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 登录或注册成功后的会话
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct SessionResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
    pub redirect: Redirect,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}
