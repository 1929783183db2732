use crate::models::{
    PaginatedResponse,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    catalog::{
        entities::{Course, Department, Enrollment, School},
        requests::{
            CourseListQuery, CreateCourseRequest, CreateDepartmentRequest, CreateSchoolRequest,
        },
    },
    dashboard::responses::CourseCounts,
    submissions::entities::{ContentUpdate, GradeUpdate, Submission, SubmissionStatus},
    users::{
        entities::User,
        requests::{NewUser, UserUpdate},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 按配置创建存储后端并执行迁移
pub async fn create_storage() -> Result<std::sync::Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(std::sync::Arc::new(storage))
}

/// 提交列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    /// 只看该教师讲授课程下的提交
    pub lecturer_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
    /// true 按提交时间倒序，false 正序
    pub newest_first: bool,
    pub limit: Option<u64>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户资料
    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 学院与系
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>>;
    // 名称或代码已被占用的学院
    async fn find_school_conflict(&self, name: &str, code: &str) -> Result<Option<School>>;
    async fn list_schools(&self) -> Result<Vec<School>>;
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>>;
    async fn get_departments_by_ids(&self, ids: &[i64]) -> Result<Vec<Department>>;
    async fn list_departments(&self, school_id: Option<i64>) -> Result<Vec<Department>>;

    /// 课程
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    async fn get_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>>;
    // 教师讲授的全部课程
    async fn list_courses_by_lecturer(&self, lecturer_id: i64) -> Result<Vec<Course>>;

    /// 选课
    async fn create_enrollment(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    async fn get_enrollment(&self, student_id: i64, course_id: i64)
    -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, student_id: i64, course_id: i64) -> Result<bool>;
    async fn list_enrollments_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    async fn count_enrollments_by_course(&self, course_id: i64) -> Result<i64>;

    /// 作业
    async fn create_assignment(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>>;
    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>>;
    // 已选课程中截止时间在 now 之后且本人尚未提交的作业
    async fn list_pending_assignments(
        &self,
        student_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业及其全部提交
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 按 (作业, 学生) 新建或覆盖提交
    async fn save_submission_content(&self, update: ContentUpdate) -> Result<Submission>;
    async fn apply_grade(&self, update: GradeUpdate) -> Result<Option<Submission>>;
    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>>;

    /// 统计
    async fn get_course_counts(&self, course_id: i64) -> Result<CourseCounts>;
}
