//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CourseSystemError, Result};
use crate::models::submissions::entities::{ContentUpdate, GradeUpdate, Submission};
use crate::storage::SubmissionListQuery;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生在某作业下的提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 保存提交内容：同一 (作业, 学生) 已有记录则原地更新，否则新建
    pub async fn save_submission_content_impl(&self, update: ContentUpdate) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(update.assignment_id))
            .filter(Column::StudentId.eq(update.student_id))
            .one(&txn)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询提交失败: {e}")))?;

        let saved = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.content = Set(update.content);
                active.status = Set(update.status.to_string());
                active.submitted_at = Set(update.submitted_at.timestamp());
                active.updated_at = Set(now);
                active.update(&txn).await.map_err(|e| {
                    CourseSystemError::database_operation(format!("更新提交失败: {e}"))
                })?
            }
            None => {
                let active = ActiveModel {
                    assignment_id: Set(update.assignment_id),
                    student_id: Set(update.student_id),
                    content: Set(update.content),
                    status: Set(update.status.to_string()),
                    marks: Set(None),
                    feedback: Set(String::new()),
                    submitted_at: Set(update.submitted_at.timestamp()),
                    updated_at: Set(now),
                    graded_by: Set(None),
                    graded_at: Set(None),
                    ..Default::default()
                };
                active.insert(&txn).await.map_err(|e| {
                    CourseSystemError::database_operation(format!("创建提交失败: {e}"))
                })?
            }
        };

        txn.commit()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved.into_submission())
    }

    /// 写入评分，分数、状态与评分人在同一次更新中完成
    pub async fn apply_grade_impl(&self, update: GradeUpdate) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(update.submission_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(update.submission_id),
            marks: Set(Some(update.marks)),
            feedback: Set(update.feedback),
            status: Set(update.status.to_string()),
            graded_by: Set(Some(update.graded_by)),
            graded_at: Set(Some(update.graded_at.timestamp())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("评分失败: {e}")))?;

        self.get_submission_by_id_impl(update.submission_id).await
    }

    /// 按条件列出提交
    pub async fn list_submissions_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<Vec<Submission>> {
        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 教师讲授课程下的作业
        if let Some(lecturer_id) = query.lecturer_id {
            let taught_assignment_ids = Query::select()
                .column(AssignmentColumn::Id)
                .from(Assignments)
                .and_where(
                    AssignmentColumn::CourseId.in_subquery(
                        Query::select()
                            .column(CourseColumn::Id)
                            .from(Courses)
                            .and_where(CourseColumn::LecturerId.eq(lecturer_id))
                            .to_owned(),
                    ),
                )
                .to_owned();
            select = select.filter(Column::AssignmentId.in_subquery(taught_assignment_ids));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = if query.newest_first {
            select
                .order_by_desc(Column::SubmittedAt)
                .order_by_desc(Column::Id)
        } else {
            select
                .order_by_asc(Column::SubmittedAt)
                .order_by_asc(Column::Id)
        };

        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let result = select
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }
}
