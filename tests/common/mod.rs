#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};

use rust_course_system::models::assignments::entities::Assignment;
use rust_course_system::models::assignments::requests::CreateAssignmentRequest;
use rust_course_system::models::catalog::entities::Course;
use rust_course_system::models::catalog::requests::{
    CreateCourseRequest, CreateDepartmentRequest, CreateSchoolRequest,
};
use rust_course_system::models::users::entities::{User, UserRole};
use rust_course_system::models::users::requests::NewUser;
use rust_course_system::storage::Storage;
use rust_course_system::storage::sea_orm_storage::SeaOrmStorage;
use rust_course_system::utils::password::hash_password;

pub const PASSWORD: &str = "Coursework42";

/// 每个测试独立的内存数据库
pub async fn storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory storage");
    Arc::new(storage)
}

pub async fn user(storage: &dyn Storage, username: &str, role: UserRole) -> User {
    storage
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password_hash: hash_password(PASSWORD).expect("hash"),
            role,
            display_name: None,
        })
        .await
        .expect("create user")
}

pub async fn student(storage: &dyn Storage, username: &str) -> User {
    user(storage, username, UserRole::Student).await
}

pub async fn lecturer(storage: &dyn Storage, username: &str) -> User {
    user(storage, username, UserRole::Lecturer).await
}

pub async fn admin(storage: &dyn Storage) -> User {
    user(storage, "root", UserRole::Admin).await
}

/// 学院、系与课程一次建好
pub async fn course(storage: &dyn Storage, code: &str, lecturer: &User) -> Course {
    let department = match storage.get_department_by_code("CS").await.expect("query") {
        Some(department) => department,
        None => {
            let school = storage
                .create_school(CreateSchoolRequest {
                    name: "School of Engineering".into(),
                    code: "ENG".into(),
                })
                .await
                .expect("create school");
            storage
                .create_department(CreateDepartmentRequest {
                    school_id: school.id,
                    name: "Computer Science".into(),
                    code: "CS".into(),
                })
                .await
                .expect("create department")
        }
    };

    storage
        .create_course(CreateCourseRequest {
            code: code.to_string(),
            name: format!("{code} course"),
            description: None,
            department_id: department.id,
            lecturer_id: lecturer.id,
        })
        .await
        .expect("create course")
}

pub async fn enroll(storage: &dyn Storage, student: &User, course: &Course) {
    storage
        .create_enrollment(student.id, course.id)
        .await
        .expect("enroll");
}

/// 截止时间相对当前时间偏移 `due_in`
pub async fn assignment(
    storage: &dyn Storage,
    course: &Course,
    title: &str,
    total_marks: f64,
    due_in: Duration,
) -> Assignment {
    storage
        .create_assignment(
            course.id,
            course.lecturer_id,
            CreateAssignmentRequest {
                title: title.to_string(),
                description: format!("{title} description"),
                due_date: Some(Utc::now() + due_in),
                total_marks,
            },
        )
        .await
        .expect("create assignment")
}
