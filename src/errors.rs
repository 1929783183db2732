//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 业务层的四类错误与请求边界的映射关系：
//! - `Validation` → 表单输入错误（400）
//! - `PermissionDenied` → 角色或归属校验失败（403，附带重定向位置）
//! - `NotFound` → 实体不存在（404）
//! - `Authentication` → 登录凭据错误（401）

use std::fmt;

use actix_web::http::StatusCode;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_course_system_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum CourseSystemError {
            $($variant(String),)*
            /// 权限不足，`location` 为展示层应跳转的位置
            PermissionDenied { message: String, location: String },
        }

        impl CourseSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseSystemError::$variant(_) => $code,)*
                    CourseSystemError::PermissionDenied { .. } => "E012",
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseSystemError::$variant(_) => $type_name,)*
                    CourseSystemError::PermissionDenied { .. } => "Permission Denied",
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseSystemError::$variant(msg) => msg,)*
                    CourseSystemError::PermissionDenied { message, .. } => message,
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_course_system_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Token("E011", "Token Error"),
}

impl CourseSystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn permission_denied<M: Into<String>, L: Into<String>>(message: M, location: L) -> Self {
        CourseSystemError::PermissionDenied {
            message: message.into(),
            location: location.into(),
        }
    }

    /// 权限错误对应的重定向位置
    pub fn redirect_location(&self) -> Option<String> {
        match self {
            CourseSystemError::PermissionDenied { location, .. } => Some(location.clone()),
            _ => None,
        }
    }

    /// 请求边界上对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            CourseSystemError::Validation(_) | CourseSystemError::DateParse(_) => {
                StatusCode::BAD_REQUEST
            }
            CourseSystemError::Authentication(_) | CourseSystemError::Token(_) => {
                StatusCode::UNAUTHORIZED
            }
            CourseSystemError::Authorization(_) | CourseSystemError::PermissionDenied { .. } => {
                StatusCode::FORBIDDEN
            }
            CourseSystemError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 响应体中的业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            CourseSystemError::Validation(_) | CourseSystemError::DateParse(_) => {
                ErrorCode::ValidationFailed
            }
            CourseSystemError::Authentication(_) => ErrorCode::AuthFailed,
            CourseSystemError::Token(_) => ErrorCode::Unauthorized,
            CourseSystemError::Authorization(_) | CourseSystemError::PermissionDenied { .. } => {
                ErrorCode::PermissionDenied
            }
            CourseSystemError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 是否属于用户可恢复的业务错误（非基础设施故障）
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl fmt::Display for CourseSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseSystemError {
    fn from(err: std::io::Error) -> Self {
        CourseSystemError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseSystemError {
    fn from(err: serde_json::Error) -> Self {
        CourseSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseSystemError {
    fn from(err: chrono::ParseError) -> Self {
        CourseSystemError::DateParse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for CourseSystemError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        CourseSystemError::Token(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseSystemError>;
