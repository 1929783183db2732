//! 提交及其状态流转
//!
//! 状态只能沿 `draft → submitted → graded` 前进，已评分的提交可以重新评分，
//! 但不能再修改内容。流转规则都在这里，由业务层显式调用。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{CourseSystemError, Result};
use crate::models::assignments::entities::Assignment;
use crate::utils::validate::has_two_decimal_places;

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "submission.ts")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
    Graded,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SubmissionStatus::Draft),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交方式：保存草稿或正式提交
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "submission.ts")]
pub enum SubmitMode {
    Draft,
    #[default]
    Final,
}

// 提交实体，每个 (作业, 学生) 至多一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub status: SubmissionStatus,
    pub marks: Option<f64>,
    pub feedback: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub graded_by: Option<i64>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 一次保存内容的结果，由存储层按 (作业, 学生) 写入
#[derive(Debug, Clone, PartialEq)]
pub struct ContentUpdate {
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// 一次评分的结果，分数与评分人在同一次更新中写入
#[derive(Debug, Clone, PartialEq)]
pub struct GradeUpdate {
    pub submission_id: i64,
    pub marks: f64,
    pub feedback: String,
    pub status: SubmissionStatus,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 提交时间晚于截止时间
    pub fn is_late(&self, assignment: &Assignment) -> bool {
        self.submitted_at > assignment.due_date
    }

    /// 已提交但尚未给分
    pub fn is_ungraded(&self) -> bool {
        self.status == SubmissionStatus::Submitted && self.marks.is_none()
    }

    /// 保存提交内容
    ///
    /// - 没有记录：按方式创建为 draft 或 submitted
    /// - draft：按方式保持 draft 或转为 submitted
    /// - submitted：覆盖内容，状态不变
    /// - graded：拒绝
    ///
    /// 每次保存都会刷新 `submitted_at`。
    pub fn save_content(
        existing: Option<&Submission>,
        assignment_id: i64,
        student_id: i64,
        content: &str,
        mode: SubmitMode,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<ContentUpdate> {
        if content.trim().is_empty() {
            return Err(CourseSystemError::validation(
                "content: Submission content cannot be empty",
            ));
        }

        let status = match (existing.map(|s| s.status), mode) {
            (Some(SubmissionStatus::Graded), _) => {
                return Err(CourseSystemError::validation(
                    "status: This submission has already been graded and can no longer be changed",
                ));
            }
            (Some(SubmissionStatus::Submitted), _) => SubmissionStatus::Submitted,
            (_, SubmitMode::Draft) => SubmissionStatus::Draft,
            (_, SubmitMode::Final) => SubmissionStatus::Submitted,
        };

        Ok(ContentUpdate {
            assignment_id,
            student_id,
            content: content.to_string(),
            status,
            submitted_at: now,
        })
    }

    /// 评分
    ///
    /// 分数必填且在 `0..=total_marks` 之间；草稿不能评分；已评分的可以重新评分。
    pub fn grade(
        &self,
        total_marks: f64,
        marks: Option<f64>,
        feedback: &str,
        grader_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<GradeUpdate> {
        if self.status == SubmissionStatus::Draft {
            return Err(CourseSystemError::validation(
                "status: A draft submission cannot be graded",
            ));
        }

        let marks = match marks {
            Some(m) if m.is_finite() => m,
            Some(_) => return Err(CourseSystemError::validation("marks: Enter a number")),
            None => return Err(CourseSystemError::validation("marks: This field is required")),
        };
        if marks < 0.0 {
            return Err(CourseSystemError::validation(
                "marks: Marks cannot be negative",
            ));
        }
        if marks > total_marks {
            return Err(CourseSystemError::validation(format!(
                "marks: Marks cannot exceed total marks ({total_marks})"
            )));
        }
        if !has_two_decimal_places(marks) {
            return Err(CourseSystemError::validation(
                "marks: Marks may have at most 2 decimal places",
            ));
        }

        Ok(GradeUpdate {
            submission_id: self.id,
            marks,
            feedback: feedback.to_string(),
            status: SubmissionStatus::Graded,
            graded_by: grader_id,
            graded_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn submission(status: SubmissionStatus) -> Submission {
        let now = Utc::now();
        Submission {
            id: 9,
            assignment_id: 3,
            student_id: 5,
            content: "answer".into(),
            status,
            marks: None,
            feedback: String::new(),
            submitted_at: now,
            updated_at: now,
            graded_by: None,
            graded_at: None,
        }
    }

    fn assignment(due_date: chrono::DateTime<Utc>) -> Assignment {
        Assignment {
            id: 3,
            course_id: 1,
            title: "Essay".into(),
            description: "Write".into(),
            due_date,
            total_marks: 100.0,
            created_by: 2,
            is_active: true,
            created_at: due_date,
            updated_at: due_date,
        }
    }

    #[test]
    fn test_first_save_follows_mode() {
        let now = Utc::now();
        let draft = Submission::save_content(None, 3, 5, "x", SubmitMode::Draft, now).unwrap();
        assert_eq!(draft.status, SubmissionStatus::Draft);
        let submitted = Submission::save_content(None, 3, 5, "x", SubmitMode::Final, now).unwrap();
        assert_eq!(submitted.status, SubmissionStatus::Submitted);
        assert_eq!(submitted.submitted_at, now);
    }

    #[test]
    fn test_draft_can_be_finalized() {
        let existing = submission(SubmissionStatus::Draft);
        let now = Utc::now();
        let update =
            Submission::save_content(Some(&existing), 3, 5, "final", SubmitMode::Final, now)
                .unwrap();
        assert_eq!(update.status, SubmissionStatus::Submitted);
        let update =
            Submission::save_content(Some(&existing), 3, 5, "more", SubmitMode::Draft, now)
                .unwrap();
        assert_eq!(update.status, SubmissionStatus::Draft);
    }

    #[test]
    fn test_resubmission_stays_submitted() {
        let existing = submission(SubmissionStatus::Submitted);
        let later = Utc::now() + Duration::hours(1);
        let update =
            Submission::save_content(Some(&existing), 3, 5, "v2", SubmitMode::Draft, later)
                .unwrap();
        assert_eq!(update.status, SubmissionStatus::Submitted);
        assert_eq!(update.content, "v2");
        assert_eq!(update.submitted_at, later);
    }

    #[test]
    fn test_graded_submission_is_locked() {
        let existing = submission(SubmissionStatus::Graded);
        let err = Submission::save_content(
            Some(&existing),
            3,
            5,
            "late edit",
            SubmitMode::Final,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, CourseSystemError::Validation(_)));
    }

    #[test]
    fn test_empty_content_rejected() {
        let err = Submission::save_content(None, 3, 5, "   ", SubmitMode::Final, Utc::now())
            .unwrap_err();
        assert!(err.message().starts_with("content: "));
    }

    #[test]
    fn test_grade_sets_status_and_grader() {
        let now = Utc::now();
        let update = submission(SubmissionStatus::Submitted)
            .grade(100.0, Some(85.0), "Good", 2, now)
            .unwrap();
        assert_eq!(update.status, SubmissionStatus::Graded);
        assert_eq!(update.marks, 85.0);
        assert_eq!(update.graded_by, 2);
        assert_eq!(update.graded_at, now);
        assert_eq!(update.submission_id, 9);
    }

    #[test]
    fn test_grade_bounds() {
        let s = submission(SubmissionStatus::Submitted);
        let now = Utc::now();
        let err = s.grade(100.0, Some(150.0), "", 2, now).unwrap_err();
        assert_eq!(
            err.message(),
            "marks: Marks cannot exceed total marks (100)"
        );
        assert!(s.grade(100.0, Some(-1.0), "", 2, now).is_err());
        assert!(s.grade(100.0, None, "", 2, now).is_err());
        assert!(s.grade(100.0, Some(f64::NAN), "", 2, now).is_err());
        assert!(s.grade(100.0, Some(0.0), "", 2, now).is_ok());
        assert!(s.grade(100.0, Some(100.0), "", 2, now).is_ok());
        let err = s.grade(99.5, Some(99.75), "", 2, now).unwrap_err();
        assert!(err.message().ends_with("(99.5)"));
        let err = s.grade(100.0, Some(85.123456), "", 2, now).unwrap_err();
        assert_eq!(
            err.message(),
            "marks: Marks may have at most 2 decimal places"
        );
        assert_eq!(s.grade(100.0, Some(85.25), "", 2, now).unwrap().marks, 85.25);
    }

    #[test]
    fn test_draft_cannot_be_graded() {
        let err = submission(SubmissionStatus::Draft)
            .grade(100.0, Some(50.0), "", 2, Utc::now())
            .unwrap_err();
        assert!(matches!(err, CourseSystemError::Validation(_)));
    }

    #[test]
    fn test_regrade_allowed() {
        let mut s = submission(SubmissionStatus::Graded);
        s.marks = Some(40.0);
        let update = s.grade(100.0, Some(60.0), "Revised", 2, Utc::now()).unwrap();
        assert_eq!(update.marks, 60.0);
        assert_eq!(update.status, SubmissionStatus::Graded);
    }

    #[test]
    fn test_is_late_strictly_after_due_date() {
        let due = Utc::now();
        let mut s = submission(SubmissionStatus::Submitted);
        s.submitted_at = due;
        assert!(!s.is_late(&assignment(due)));
        s.submitted_at = due + Duration::seconds(1);
        assert!(s.is_late(&assignment(due)));
    }

    #[test]
    fn test_is_ungraded() {
        assert!(submission(SubmissionStatus::Submitted).is_ungraded());
        assert!(!submission(SubmissionStatus::Draft).is_ungraded());
        let mut graded = submission(SubmissionStatus::Graded);
        graded.marks = Some(1.0);
        assert!(!graded.is_ungraded());
    }
}
