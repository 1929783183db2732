//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{CourseSystemError, Result};
use crate::models::{
    PaginatedResponse,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
};
use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 学生已选课程的 ID
fn enrolled_course_ids(student_id: i64) -> SelectStatement {
    Query::select()
        .column(EnrollmentColumn::CourseId)
        .from(Enrollments)
        .and_where(EnrollmentColumn::StudentId.eq(student_id))
        .to_owned()
}

/// 教师讲授课程的 ID
fn taught_course_ids(lecturer_id: i64) -> SelectStatement {
    Query::select()
        .column(CourseColumn::Id)
        .from(Courses)
        .and_where(CourseColumn::LecturerId.eq(lecturer_id))
        .to_owned()
}

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let due_date = req
            .due_date
            .ok_or_else(|| CourseSystemError::validation("due_date: Due date is required"))?;

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            due_date: Set(due_date.timestamp()),
            total_marks: Set(req.total_marks),
            created_by: Set(created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn get_assignments_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Assignments::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("批量查询作业失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 分页列出作业，按截止时间倒序
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Assignments::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::CourseId.in_subquery(enrolled_course_ids(student_id)));
        }

        if let Some(lecturer_id) = query.lecturer_id {
            select = select.filter(Column::CourseId.in_subquery(taught_course_ids(lecturer_id)));
        }

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select
            .order_by_desc(Column::DueDate)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CourseSystemError::database_operation(format!("查询作业总数失败: {e}"))
        })?;

        let assignments = paginator.fetch_page(page - 1).await.map_err(|e| {
            CourseSystemError::database_operation(format!("查询作业列表失败: {e}"))
        })?;

        Ok(PaginatedResponse::new(
            assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            page as i64,
            size as i64,
            total as i64,
        ))
    }

    pub async fn list_assignments_by_course_impl(&self, course_id: i64) -> Result<Vec<Assignment>> {
        let result = Assignments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询课程作业失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 待完成作业：已选课程、未截止、本人没有任何状态的提交
    pub async fn list_pending_assignments_impl(
        &self,
        student_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Assignment>> {
        let submitted_assignment_ids = Query::select()
            .column(SubmissionColumn::AssignmentId)
            .from(Submissions)
            .and_where(SubmissionColumn::StudentId.eq(student_id))
            .to_owned();

        let result = Assignments::find()
            .filter(Column::CourseId.in_subquery(enrolled_course_ids(student_id)))
            .filter(Column::DueDate.gt(now.timestamp()))
            .filter(Column::Id.not_in_subquery(submitted_assignment_ids))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询待完成作业失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        if self.get_assignment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }

        if let Some(total_marks) = update.total_marks {
            model.total_marks = Set(total_marks);
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(id).await
    }

    /// 删除作业，在同一事务中先删除其全部提交
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("删除作业提交失败: {e}"))
            })?;

        let result = Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
