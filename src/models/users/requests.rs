use serde::Deserialize;
use ts_rs::TS;

// 个人资料编辑请求，角色与状态不可在此修改
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}

// 存储层使用的用户更新参数
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub display_name: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub password_hash: Option<String>,
}

// 存储层使用的用户创建参数
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: super::entities::UserRole,
    pub display_name: Option<String>,
}
