use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::locations;

// 用户角色，创建后不可修改
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Student,  // 学生
    Lecturer, // 教师
    Admin,    // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const LECTURER: &'static str = "lecturer";
    pub const ADMIN: &'static str = "admin";

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => Self::STUDENT,
            UserRole::Lecturer => Self::LECTURER,
            UserRole::Admin => Self::ADMIN,
        }
    }

    /// 自助注册允许选择的角色
    pub fn registrable_roles() -> &'static [UserRole] {
        &[UserRole::Student, UserRole::Lecturer]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, lecturer, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::LECTURER => Ok(UserRole::Lecturer),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    pub fn is_lecturer(&self) -> bool {
        self.role == UserRole::Lecturer
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// 展示用名称，没有设置时回退到用户名
    pub fn full_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    /// 注册后跳转的仪表盘
    pub fn dashboard_location(&self) -> &'static str {
        if self.is_student() {
            locations::STUDENT_DASHBOARD
        } else {
            locations::LECTURER_DASHBOARD
        }
    }

    /// 登录后跳转的位置：管理员进入后台
    pub fn login_location(&self) -> &'static str {
        match self.role {
            UserRole::Student => locations::STUDENT_DASHBOARD,
            UserRole::Lecturer => locations::LECTURER_DASHBOARD,
            UserRole::Admin => locations::ADMIN_INDEX,
        }
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> crate::errors::Result<crate::utils::jwt::TokenPair> {
        Ok(crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )?)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            display_name: self.full_name().to_string(),
            role: self.role,
        }
    }
}

// 嵌入到其它视图中的用户摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, display_name: Option<&str>) -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password_hash: "hash".into(),
            role,
            status: UserStatus::Active,
            display_name: display_name.map(str::to_string),
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("student".parse::<UserRole>(), Ok(UserRole::Student));
        assert_eq!("lecturer".parse::<UserRole>(), Ok(UserRole::Lecturer));
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert!("professor".parse::<UserRole>().is_err());
        assert!(serde_json::from_str::<UserRole>(r#""root""#).is_err());
    }

    #[test]
    fn test_role_display_roundtrips_storage_value() {
        for role in [UserRole::Student, UserRole::Lecturer, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn test_login_location_by_role() {
        assert_eq!(
            user(UserRole::Student, None).login_location(),
            locations::STUDENT_DASHBOARD
        );
        assert_eq!(
            user(UserRole::Lecturer, None).login_location(),
            locations::LECTURER_DASHBOARD
        );
        assert_eq!(
            user(UserRole::Admin, None).login_location(),
            locations::ADMIN_INDEX
        );
        assert_eq!(
            user(UserRole::Admin, None).dashboard_location(),
            locations::LECTURER_DASHBOARD
        );
    }

    #[test]
    fn test_full_name_falls_back_to_username() {
        assert_eq!(user(UserRole::Student, None).full_name(), "alice");
        assert_eq!(user(UserRole::Student, Some("  ")).full_name(), "alice");
        assert_eq!(
            user(UserRole::Student, Some("Alice Liddell")).full_name(),
            "Alice Liddell"
        );
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let value = serde_json::to_value(user(UserRole::Student, None)).unwrap();
        assert!(value.get("password_hash").is_none());
    }
}
