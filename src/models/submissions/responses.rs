use serde::Serialize;
use ts_rs::TS;

use super::entities::{Submission, SubmissionStatus};
use crate::models::assignments::entities::Assignment;
use crate::models::catalog::entities::Course;
use crate::models::users::entities::UserSummary;
use crate::utils::filters::{divide, multiply};

/// 得分百分比，未评分或总分非法时为空字符串
pub fn score_percentage(marks: Option<f64>, total_marks: f64) -> String {
    match marks {
        Some(marks) => multiply(&divide(&marks.to_string(), &total_marks.to_string()), "100"),
        None => String::new(),
    }
}

/// 作业详情中展示的本人提交
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionSummary {
    pub id: i64,
    pub status: SubmissionStatus,
    pub content: String,
    pub marks: Option<f64>,
    pub feedback: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_late: bool,
}

impl SubmissionSummary {
    pub fn new(submission: Submission, assignment: &Assignment) -> Self {
        let is_late = submission.is_late(assignment);
        Self {
            id: submission.id,
            status: submission.status,
            content: submission.content,
            marks: submission.marks,
            feedback: submission.feedback,
            submitted_at: submission.submitted_at,
            graded_at: submission.graded_at,
            is_late,
        }
    }
}

/// 提交列表项（包含作业、课程与学生信息）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListItem {
    pub submission: Submission,
    pub assignment_title: String,
    pub total_marks: f64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub student: UserSummary,
    pub is_late: bool,
    pub score_percentage: String,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
}

/// 提交详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionDetailResponse {
    pub submission: Submission,
    pub assignment: Assignment,
    pub course: Course,
    pub student: UserSummary,
    pub graded_by: Option<UserSummary>,
    pub is_late: bool,
    pub score_percentage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_percentage() {
        assert_eq!(score_percentage(Some(85.0), 100.0), "85");
        assert_eq!(score_percentage(Some(15.0), 20.0), "75");
        assert_eq!(score_percentage(None, 100.0), "");
        assert_eq!(score_percentage(Some(5.0), 0.0), "");
    }
}
