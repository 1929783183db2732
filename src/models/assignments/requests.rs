use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{
    FieldErrors, validate_assignment_title, validate_not_blank, validate_total_marks,
};

// 作业创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: String,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: f64,
}

impl CreateAssignmentRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_assignment_title(&self.title));
        errors.check(
            "description",
            validate_not_blank(&self.description, "Description"),
        );
        if self.due_date.is_none() {
            errors.add("due_date", "Due date is required");
        }
        errors.check("total_marks", validate_total_marks(self.total_marks));
        errors.into_result()
    }
}

// 作业更新请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_marks: Option<f64>,
    pub is_active: Option<bool>,
}

impl UpdateAssignmentRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            errors.check("title", validate_assignment_title(title));
        }
        if let Some(description) = &self.description {
            errors.check("description", validate_not_blank(description, "Description"));
        }
        if let Some(total_marks) = self.total_marks {
            errors.check("total_marks", validate_total_marks(total_marks));
        }
        errors.into_result()
    }
}

// 作业列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}

// 作业列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: u64,
    pub size: u64,
    /// 学生：只看已选课程的作业
    pub student_id: Option<i64>,
    /// 教师：只看自己讲授课程的作业
    pub lecturer_id: Option<i64>,
    pub course_id: Option<i64>,
}
