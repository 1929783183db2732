use super::entities::User;
use crate::models::submissions::responses::SubmissionListItem;
use serde::Serialize;
use ts_rs::TS;

// 用户响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserResponse {
    pub user: User,
}

// 个人资料页：学生附带最近的提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct ProfileResponse {
    pub user: User,
    pub recent_submissions: Vec<SubmissionListItem>,
}
