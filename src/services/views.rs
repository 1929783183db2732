//! 视图组装
//!
//! 列表与详情页需要的关联数据（课程、系、教师、作业、学生）统一在这里批量加载，
//! 避免逐条查询。

use std::collections::HashMap;

use crate::errors::{CourseSystemError, Result};
use crate::models::assignments::{entities::Assignment, responses::AssignmentView};
use crate::models::catalog::{
    entities::{Course, Department},
    responses::CourseView,
};
use crate::models::submissions::{
    entities::Submission,
    responses::{SubmissionListItem, score_percentage},
};
use crate::models::users::entities::User;
use crate::storage::Storage;

pub(crate) async fn load_course(storage: &dyn Storage, id: i64) -> Result<Course> {
    storage
        .get_course_by_id(id)
        .await?
        .ok_or_else(|| CourseSystemError::not_found("Course not found"))
}

pub(crate) async fn load_assignment(storage: &dyn Storage, id: i64) -> Result<Assignment> {
    storage
        .get_assignment_by_id(id)
        .await?
        .ok_or_else(|| CourseSystemError::not_found("Assignment not found"))
}

pub(crate) async fn load_submission(storage: &dyn Storage, id: i64) -> Result<Submission> {
    storage
        .get_submission_by_id(id)
        .await?
        .ok_or_else(|| CourseSystemError::not_found("Submission not found"))
}

pub(crate) async fn load_user(storage: &dyn Storage, id: i64) -> Result<User> {
    storage
        .get_user_by_id(id)
        .await?
        .ok_or_else(|| CourseSystemError::not_found("User not found"))
}

fn unique_ids(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

async fn users_by_id(storage: &dyn Storage, ids: Vec<i64>) -> Result<HashMap<i64, User>> {
    Ok(storage
        .get_users_by_ids(&unique_ids(ids.into_iter()))
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect())
}

async fn courses_by_id(storage: &dyn Storage, ids: Vec<i64>) -> Result<HashMap<i64, Course>> {
    Ok(storage
        .get_courses_by_ids(&unique_ids(ids.into_iter()))
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

pub(crate) async fn departments_by_id(
    storage: &dyn Storage,
    ids: Vec<i64>,
) -> Result<HashMap<i64, Department>> {
    Ok(storage
        .get_departments_by_ids(&unique_ids(ids.into_iter()))
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect())
}

// 外键保证关联存在，缺失说明数据不一致
fn missing(kind: &str, id: i64) -> CourseSystemError {
    CourseSystemError::database_operation(format!("关联的{kind}不存在: {id}"))
}

/// 课程附带系与授课教师
pub(crate) async fn course_views(
    storage: &dyn Storage,
    courses: Vec<Course>,
) -> Result<Vec<CourseView>> {
    let departments =
        departments_by_id(storage, courses.iter().map(|c| c.department_id).collect()).await?;
    let lecturers = users_by_id(storage, courses.iter().map(|c| c.lecturer_id).collect()).await?;

    courses
        .into_iter()
        .map(|course| {
            let department = departments
                .get(&course.department_id)
                .cloned()
                .ok_or_else(|| missing("系", course.department_id))?;
            let lecturer = lecturers
                .get(&course.lecturer_id)
                .map(User::summary)
                .ok_or_else(|| missing("教师", course.lecturer_id))?;
            Ok(CourseView {
                course,
                department,
                lecturer,
            })
        })
        .collect()
}

pub(crate) async fn course_view(storage: &dyn Storage, course: Course) -> Result<CourseView> {
    course_views(storage, vec![course])
        .await?
        .pop()
        .ok_or_else(|| CourseSystemError::not_found("Course not found"))
}

/// 作业附带课程与创建者
pub(crate) async fn assignment_views(
    storage: &dyn Storage,
    assignments: Vec<Assignment>,
) -> Result<Vec<AssignmentView>> {
    let now = chrono::Utc::now();
    let courses = courses_by_id(storage, assignments.iter().map(|a| a.course_id).collect()).await?;
    let creators =
        users_by_id(storage, assignments.iter().map(|a| a.created_by).collect()).await?;

    assignments
        .into_iter()
        .map(|assignment| {
            let course = courses
                .get(&assignment.course_id)
                .cloned()
                .ok_or_else(|| missing("课程", assignment.course_id))?;
            let created_by = creators
                .get(&assignment.created_by)
                .map(User::summary)
                .ok_or_else(|| missing("用户", assignment.created_by))?;
            Ok(AssignmentView {
                is_past_due: assignment.is_past_due(now),
                assignment,
                course,
                created_by,
            })
        })
        .collect()
}

/// 提交列表项附带作业、课程与学生
pub(crate) async fn submission_items(
    storage: &dyn Storage,
    submissions: Vec<Submission>,
) -> Result<Vec<SubmissionListItem>> {
    let assignment_ids = unique_ids(submissions.iter().map(|s| s.assignment_id));
    let assignments: HashMap<i64, Assignment> = storage
        .get_assignments_by_ids(&assignment_ids)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let courses = courses_by_id(storage, assignments.values().map(|a| a.course_id).collect()).await?;
    let students =
        users_by_id(storage, submissions.iter().map(|s| s.student_id).collect()).await?;

    submissions
        .into_iter()
        .map(|submission| {
            let assignment = assignments
                .get(&submission.assignment_id)
                .ok_or_else(|| missing("作业", submission.assignment_id))?;
            let course = courses
                .get(&assignment.course_id)
                .ok_or_else(|| missing("课程", assignment.course_id))?;
            let student = students
                .get(&submission.student_id)
                .map(User::summary)
                .ok_or_else(|| missing("学生", submission.student_id))?;
            Ok(SubmissionListItem {
                is_late: submission.is_late(assignment),
                score_percentage: score_percentage(submission.marks, assignment.total_marks),
                assignment_title: assignment.title.clone(),
                total_marks: assignment.total_marks,
                due_date: assignment.due_date,
                course_id: course.id,
                course_code: course.code.clone(),
                course_name: course.name.clone(),
                student,
                submission,
            })
        })
        .collect()
}
