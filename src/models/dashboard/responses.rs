use serde::Serialize;
use ts_rs::TS;

use crate::models::assignments::responses::AssignmentView;
use crate::models::catalog::entities::{Course, Department};
use crate::models::catalog::responses::EnrollmentView;
use crate::models::submissions::responses::SubmissionListItem;

// 学生仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct StudentDashboardResponse {
    pub enrollments: Vec<EnrollmentView>,
    pub pending_assignments: Vec<AssignmentView>,
    pub recent_submissions: Vec<SubmissionListItem>,
}

/// 单门课程的统计，计数均为去重后的数量
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct CourseCounts {
    pub student_count: i64,
    pub assignment_count: i64,
    pub submission_count: i64,
    pub ungraded_count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct CourseStats {
    pub course: Course,
    pub department: Department,
    #[serde(flatten)]
    #[ts(flatten)]
    pub counts: CourseCounts,
}

// 所有课程的汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardTotals {
    pub total_courses: i64,
    pub total_students: i64,
    pub total_assignments: i64,
    pub total_submissions: i64,
    pub total_ungraded: i64,
}

impl DashboardTotals {
    pub fn from_courses(courses: &[CourseStats]) -> Self {
        courses.iter().fold(
            DashboardTotals {
                total_courses: courses.len() as i64,
                ..Default::default()
            },
            |mut acc, stats| {
                acc.total_students += stats.counts.student_count;
                acc.total_assignments += stats.counts.assignment_count;
                acc.total_submissions += stats.counts.submission_count;
                acc.total_ungraded += stats.counts.ungraded_count;
                acc
            },
        )
    }
}

// 教师仪表盘
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct LecturerDashboardResponse {
    pub courses: Vec<CourseStats>,
    pub recent_submissions: Vec<SubmissionListItem>,
    pub totals: DashboardTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_of_no_courses_are_zero() {
        assert_eq!(DashboardTotals::from_courses(&[]), DashboardTotals::default());
    }
}
