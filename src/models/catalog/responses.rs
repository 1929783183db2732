use serde::Serialize;
use ts_rs::TS;

use super::entities::{Course, Department, Enrollment, School};
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::UserSummary;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct SchoolListResponse {
    pub items: Vec<School>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct DepartmentListResponse {
    pub items: Vec<Department>,
}

// 课程及其所属系和授课教师
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CourseView {
    pub course: Course,
    pub department: Department,
    pub lecturer: UserSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: CourseView,
    pub assignments: Vec<Assignment>,
    pub enrolled_count: i64,
}

// 选课记录及课程信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct EnrollmentView {
    pub enrollment: Enrollment,
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: CourseView,
}
