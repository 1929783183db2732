use serde::{Deserialize, Serialize};

/// 响应体中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求参数
    BadRequest = 1000,
    ValidationFailed = 1001,

    // 认证与权限
    Unauthorized = 2000,
    AuthFailed = 2001,
    AccountDisabled = 2002,
    PermissionDenied = 2003,

    // 资源
    NotFound = 3000,

    InternalServerError = 5000,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::ValidationFailed as i32, 1001);
        assert_eq!(ErrorCode::PermissionDenied as i32, 2003);
        assert_eq!(ErrorCode::NotFound as i32, 3000);
    }
}
