//! 仪表盘统计

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{CourseSystemError, Result};
use crate::models::dashboard::responses::CourseCounts;
use crate::models::submissions::entities::SubmissionStatus;
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 单门课程的选课人数、作业数、提交数与未评分数
    pub async fn get_course_counts_impl(&self, course_id: i64) -> Result<CourseCounts> {
        let student_count = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("统计选课人数失败: {e}")))?;

        let assignment_count = Assignments::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("统计作业数失败: {e}")))?;

        let course_assignment_ids = || {
            Query::select()
                .column(AssignmentColumn::Id)
                .from(Assignments)
                .and_where(AssignmentColumn::CourseId.eq(course_id))
                .to_owned()
        };

        let submission_count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.in_subquery(course_assignment_ids()))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("统计提交数失败: {e}")))?;

        let ungraded_count = Submissions::find()
            .filter(SubmissionColumn::AssignmentId.in_subquery(course_assignment_ids()))
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::Submitted.to_string()))
            .filter(SubmissionColumn::Marks.is_null())
            .count(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("统计未评分提交失败: {e}"))
            })?;

        Ok(CourseCounts {
            student_count: student_count as i64,
            assignment_count: assignment_count as i64,
            submission_count: submission_count as i64,
            ungraded_count: ungraded_count as i64,
        })
    }
}
