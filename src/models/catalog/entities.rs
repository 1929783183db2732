use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学院
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct School {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 系
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Department {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 课程，归属唯一的授课教师
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub department_id: i64,
    pub lecturer_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn is_taught_by(&self, user_id: i64) -> bool {
        self.lecturer_id == user_id
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "catalog.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
