//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod catalog;
mod dashboard;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存数据库每个连接都是独立的库，只能使用单连接且不回收。
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| CourseSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
    submissions::entities::{ContentUpdate, GradeUpdate, Submission},
    users::{
        entities::User,
        requests::{NewUser, UserUpdate},
    },
};
use crate::storage::{Storage, SubmissionListQuery};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学院与系
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(req).await
    }

    async fn get_school_by_id(&self, id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(id).await
    }

    async fn find_school_conflict(&self, name: &str, code: &str) -> Result<Option<School>> {
        self.find_school_conflict_impl(name, code).await
    }

    async fn list_schools(&self) -> Result<Vec<School>> {
        self.list_schools_impl().await
    }

    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn get_department_by_code(&self, code: &str) -> Result<Option<Department>> {
        self.get_department_by_code_impl(code).await
    }

    async fn get_departments_by_ids(&self, ids: &[i64]) -> Result<Vec<Department>> {
        self.get_departments_by_ids_impl(ids).await
    }

    async fn list_departments(&self, school_id: Option<i64>) -> Result<Vec<Department>> {
        self.list_departments_impl(school_id).await
    }

    // 课程
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn get_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>> {
        self.get_courses_by_ids_impl(ids).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_courses_by_lecturer(&self, lecturer_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_lecturer_impl(lecturer_id).await
    }

    // 选课
    async fn create_enrollment(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, course_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    async fn delete_enrollment(&self, student_id: i64, course_id: i64) -> Result<bool> {
        self.delete_enrollment_impl(student_id, course_id).await
    }

    async fn list_enrollments_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_student_impl(student_id).await
    }

    async fn count_enrollments_by_course(&self, course_id: i64) -> Result<i64> {
        self.count_enrollments_by_course_impl(course_id).await
    }

    // 作业
    async fn create_assignment(
        &self,
        course_id: i64,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, created_by, req)
            .await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        self.get_assignments_by_ids_impl(ids).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<PaginatedResponse<Assignment>> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_assignments_by_course(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_by_course_impl(course_id).await
    }

    async fn list_pending_assignments(
        &self,
        student_id: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Assignment>> {
        self.list_pending_assignments_impl(student_id, now).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, student_id).await
    }

    async fn save_submission_content(&self, update: ContentUpdate) -> Result<Submission> {
        self.save_submission_content_impl(update).await
    }

    async fn apply_grade(&self, update: GradeUpdate) -> Result<Option<Submission>> {
        self.apply_grade_impl(update).await
    }

    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>> {
        self.list_submissions_impl(query).await
    }

    // 统计
    async fn get_course_counts(&self, course_id: i64) -> Result<CourseCounts> {
        self.get_course_counts_impl(course_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("data.db").unwrap(),
            "sqlite://data.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").unwrap(),
            "postgres://u:p@localhost/db"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
