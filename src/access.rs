//! 统一的权限判定
//!
//! 所有基于角色和归属的判断都通过 [`authorize`] 完成，拒绝时返回
//! `PermissionDenied` 错误，展示层据此重定向。

use crate::errors::{CourseSystemError, Result};
use crate::models::catalog::entities::Course;
use crate::models::locations;
use crate::models::users::entities::User;

/// 需要授权的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateAssignment,
    EditAssignment { assignment_id: i64 },
    DeleteAssignment { assignment_id: i64 },
    SubmitAssignment,
    ViewSubmission,
    GradeSubmission { submission_id: i64 },
    ViewMySubmissions,
    ViewPendingSubmissions,
    ViewStudentDashboard,
    ViewLecturerDashboard,
    ManageCatalog,
    ManageEnrollment,
}

/// 操作作用的对象
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Global,
    Course(&'a Course),
    Submission { owner_id: i64, course: &'a Course },
}

impl Target<'_> {
    fn course(&self) -> Option<&Course> {
        match self {
            Target::Global => None,
            Target::Course(course) => Some(course),
            Target::Submission { course, .. } => Some(course),
        }
    }

    fn taught_by(&self, principal: &User) -> bool {
        self.course()
            .is_some_and(|course| course.is_taught_by(principal.id))
    }
}

/// 拒绝时的提示信息与重定向位置
fn denial(operation: Operation, target: &Target<'_>) -> (&'static str, String) {
    let course_location = || {
        target
            .course()
            .map(|c| locations::course_detail(c.id))
            .unwrap_or_else(|| locations::COURSE_LIST.to_string())
    };

    match operation {
        Operation::CreateAssignment => (
            "Only the course lecturer can create assignments.",
            course_location(),
        ),
        Operation::EditAssignment { assignment_id } => (
            "Only the course lecturer can edit assignments.",
            locations::assignment_detail(assignment_id),
        ),
        Operation::DeleteAssignment { assignment_id } => (
            "Only the course lecturer can delete assignments.",
            locations::assignment_detail(assignment_id),
        ),
        Operation::SubmitAssignment => (
            "Only students can submit assignments.",
            locations::ASSIGNMENT_LIST.to_string(),
        ),
        Operation::ViewSubmission => (
            "You do not have permission to view this submission.",
            locations::ASSIGNMENT_LIST.to_string(),
        ),
        Operation::GradeSubmission { submission_id } => (
            "Only the course lecturer can grade submissions.",
            locations::submission_detail(submission_id),
        ),
        Operation::ViewMySubmissions => (
            "Only students can view their submissions.",
            locations::ASSIGNMENT_LIST.to_string(),
        ),
        Operation::ViewPendingSubmissions => (
            "Only lecturers can view pending submissions.",
            locations::ASSIGNMENT_LIST.to_string(),
        ),
        Operation::ViewStudentDashboard => (
            "Access denied. Students only.",
            locations::HOME.to_string(),
        ),
        Operation::ViewLecturerDashboard => (
            "Access denied. Lecturers only.",
            locations::HOME.to_string(),
        ),
        Operation::ManageCatalog => (
            "Only administrators can manage the course catalog.",
            locations::COURSE_LIST.to_string(),
        ),
        Operation::ManageEnrollment => (
            "Only administrators or the course lecturer can manage enrollments.",
            course_location(),
        ),
    }
}

/// 判断主体能否对目标执行操作
pub fn is_allowed(principal: &User, operation: Operation, target: &Target<'_>) -> bool {
    match operation {
        Operation::CreateAssignment
        | Operation::EditAssignment { .. }
        | Operation::DeleteAssignment { .. }
        | Operation::GradeSubmission { .. } => target.taught_by(principal),
        Operation::SubmitAssignment | Operation::ViewMySubmissions => principal.is_student(),
        Operation::ViewStudentDashboard => principal.is_student(),
        Operation::ViewPendingSubmissions | Operation::ViewLecturerDashboard => {
            principal.is_lecturer()
        }
        Operation::ViewSubmission => match target {
            Target::Submission { owner_id, .. } => {
                *owner_id == principal.id || target.taught_by(principal)
            }
            _ => false,
        },
        Operation::ManageCatalog => principal.is_admin(),
        Operation::ManageEnrollment => principal.is_admin() || target.taught_by(principal),
    }
}

/// 授权检查，拒绝时返回带有重定向位置的错误
pub fn authorize(principal: &User, operation: Operation, target: Target<'_>) -> Result<()> {
    if is_allowed(principal, operation, &target) {
        return Ok(());
    }

    let (message, location) = denial(operation, &target);
    tracing::info!(
        "拒绝用户 {} ({}) 执行 {:?}",
        principal.id,
        principal.role,
        operation
    );
    Err(CourseSystemError::PermissionDenied {
        message: message.to_string(),
        location,
    })
}
