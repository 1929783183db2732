use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateSchoolRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateDepartmentRequest {
    pub school_id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CreateCourseRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub department_id: i64,
    pub lecturer_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct EnrollStudentRequest {
    pub student_id: i64,
}

// 系列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct DepartmentListParams {
    pub school_id: Option<i64>,
}

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: u64,
    pub size: u64,
    /// 仅返回该学生选修的课程
    pub student_id: Option<i64>,
    /// 仅返回该教师讲授的课程
    pub lecturer_id: Option<i64>,
    pub search: Option<String>,
}
