//! 重定向指令
//!
//! 写操作不渲染页面，而是返回 `{location, level, message}` 交给展示层处理。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 提示消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "api.ts")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct Redirect {
    pub location: String,
    pub level: FlashLevel,
    pub message: String,
}

impl Redirect {
    pub fn success(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// 展示层可识别的页面位置
pub mod locations {
    pub const HOME: &str = "/";
    pub const ADMIN_INDEX: &str = "/admin/";
    pub const STUDENT_DASHBOARD: &str = "/api/v1/dashboard/student";
    pub const LECTURER_DASHBOARD: &str = "/api/v1/dashboard/lecturer";
    pub const ASSIGNMENT_LIST: &str = "/api/v1/assignments";
    pub const MY_SUBMISSIONS: &str = "/api/v1/submissions/my";
    pub const COURSE_LIST: &str = "/api/v1/courses";
    pub const SCHOOL_LIST: &str = "/api/v1/schools";
    pub const DEPARTMENT_LIST: &str = "/api/v1/departments";
    pub const PROFILE: &str = "/api/v1/auth/profile";

    pub fn course_detail(course_id: i64) -> String {
        format!("/api/v1/courses/{course_id}")
    }

    pub fn assignment_detail(assignment_id: i64) -> String {
        format!("/api/v1/assignments/{assignment_id}")
    }

    pub fn submission_detail(submission_id: i64) -> String {
        format!("/api/v1/submissions/{submission_id}")
    }
}
