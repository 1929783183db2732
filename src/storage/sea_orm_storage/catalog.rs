//! 学院、系、课程与选课存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{
    ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as Courses,
};
use crate::entity::departments::{
    ActiveModel as DepartmentActiveModel, Column as DepartmentColumn, Entity as Departments,
};
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::schools::{
    ActiveModel as SchoolActiveModel, Column as SchoolColumn, Entity as Schools,
};
use crate::errors::{CourseSystemError, Result};
use crate::models::{
    PaginatedResponse,
    catalog::{
        entities::{Course, Department, Enrollment, School},
        requests::{
            CourseListQuery, CreateCourseRequest, CreateDepartmentRequest, CreateSchoolRequest,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学院
    pub async fn create_school_impl(&self, req: CreateSchoolRequest) -> Result<School> {
        let model = SchoolActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建学院失败: {e}")))?;

        Ok(result.into_school())
    }

    pub async fn get_school_by_id_impl(&self, id: i64) -> Result<Option<School>> {
        let result = Schools::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_school()))
    }

    /// 查找名称或代码冲突的学院
    pub async fn find_school_conflict_impl(
        &self,
        name: &str,
        code: &str,
    ) -> Result<Option<School>> {
        let result = Schools::find()
            .filter(
                Condition::any()
                    .add(SchoolColumn::Name.eq(name))
                    .add(SchoolColumn::Code.eq(code)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_school()))
    }

    pub async fn list_schools_impl(&self) -> Result<Vec<School>> {
        let result = Schools::find()
            .order_by_asc(SchoolColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询学院列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_school()).collect())
    }

    /// 创建系
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let model = DepartmentActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            code: Set(req.code),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建系失败: {e}")))?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn get_department_by_code_impl(&self, code: &str) -> Result<Option<Department>> {
        let result = Departments::find()
            .filter(DepartmentColumn::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn get_departments_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Department>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Departments::find()
            .filter(DepartmentColumn::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("批量查询系失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_department()).collect())
    }

    pub async fn list_departments_impl(&self, school_id: Option<i64>) -> Result<Vec<Department>> {
        let mut select = Departments::find();
        if let Some(school_id) = school_id {
            select = select.filter(DepartmentColumn::SchoolId.eq(school_id));
        }

        let result = select
            .order_by_asc(DepartmentColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询系列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_department()).collect())
    }

    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = CourseActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            description: Set(req.description),
            department_id: Set(req.department_id),
            lecturer_id: Set(req.lecturer_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(CourseColumn::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn get_courses_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Courses::find()
            .filter(CourseColumn::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("批量查询课程失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let page = query.page.max(1);
        let size = query.size.max(1);

        let mut select = Courses::find();

        // 学生只看已选课程
        if let Some(student_id) = query.student_id {
            select = select.filter(
                CourseColumn::Id.in_subquery(
                    Query::select()
                        .column(EnrollmentColumn::CourseId)
                        .from(Enrollments)
                        .and_where(EnrollmentColumn::StudentId.eq(student_id))
                        .to_owned(),
                ),
            );
        }

        // 教师只看自己讲授的课程
        if let Some(lecturer_id) = query.lecturer_id {
            select = select.filter(CourseColumn::LecturerId.eq(lecturer_id));
        }

        // 按代码或名称搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(CourseColumn::Code.contains(&escaped))
                    .add(CourseColumn::Name.contains(&escaped)),
            );
        }

        select = select.order_by_asc(CourseColumn::Code);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CourseSystemError::database_operation(format!("查询课程总数失败: {e}"))
        })?;

        let courses = paginator.fetch_page(page - 1).await.map_err(|e| {
            CourseSystemError::database_operation(format!("查询课程列表失败: {e}"))
        })?;

        Ok(PaginatedResponse::new(
            courses.into_iter().map(|m| m.into_course()).collect(),
            page as i64,
            size as i64,
            total as i64,
        ))
    }

    pub async fn list_courses_by_lecturer_impl(&self, lecturer_id: i64) -> Result<Vec<Course>> {
        let result = Courses::find()
            .filter(CourseColumn::LecturerId.eq(lecturer_id))
            .order_by_asc(CourseColumn::Code)
            .all(&self.db)
            .await
            .map_err(|e| {
                CourseSystemError::database_operation(format!("查询教师课程失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 选课
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Enrollment> {
        let model = EnrollmentActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn delete_enrollment_impl(&self, student_id: i64, course_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_enrollments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>> {
        let result = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .order_by_desc(EnrollmentColumn::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    pub async fn count_enrollments_by_course_impl(&self, course_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("统计选课人数失败: {e}")))?;

        Ok(count as i64)
    }
}
