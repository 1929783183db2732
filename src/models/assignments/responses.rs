use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::catalog::entities::Course;
use crate::models::submissions::responses::SubmissionSummary;
use crate::models::users::entities::UserSummary;

// 作业及其课程、创建者
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentView {
    pub assignment: Assignment,
    pub course: Course,
    pub created_by: UserSummary,
    pub is_past_due: bool,
}

// 作业详情，学生可以看到自己的提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: AssignmentView,
    pub my_submission: Option<SubmissionSummary>,
}
