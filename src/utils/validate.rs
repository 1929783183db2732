use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{CourseSystemError, Result};

// 字母、数字以及 @ . + - _
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid code regex"));

const USERNAME_MAX_LEN: usize = 150;
const TITLE_MAX_LEN: usize = 200;
const CODE_MAX_LEN: usize = 20;
const NAME_MAX_LEN: usize = 200;
const TOTAL_MARKS_MAX: f64 = 999.99;

/// 表单字段错误收集器
///
/// 最终错误信息形如 `field: message; field: message`。
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_string(), message.into()));
    }

    pub fn check<E: Into<String>>(&mut self, field: &str, result: std::result::Result<(), E>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(CourseSystemError::validation(message))
    }
}

pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX_LEN {
        return Err("Username length must be between 1 and 150 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, numbers, and @/./+/-/_ characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> std::result::Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

pub fn validate_not_blank(value: &str, label: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{label} cannot be empty"));
    }
    Ok(())
}

pub fn validate_assignment_title(title: &str) -> std::result::Result<(), &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title cannot be empty");
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err("Title must be at most 200 characters");
    }
    Ok(())
}

/// 总分：大于 0，不超过 999.99，最多两位小数
pub fn validate_total_marks(total_marks: f64) -> std::result::Result<(), &'static str> {
    if !total_marks.is_finite() || total_marks <= 0.0 {
        return Err("Total marks must be greater than 0");
    }
    if total_marks > TOTAL_MARKS_MAX {
        return Err("Total marks must not exceed 999.99");
    }
    if !has_two_decimal_places(total_marks) {
        return Err("Total marks may have at most 2 decimal places");
    }
    Ok(())
}

/// 分数最多两位小数
pub fn has_two_decimal_places(value: f64) -> bool {
    let scaled = value * 100.0;
    (scaled - scaled.round()).abs() <= 1e-6
}

/// 学院、系、课程代码
pub fn validate_code(code: &str) -> std::result::Result<(), &'static str> {
    if code.is_empty() || code.len() > CODE_MAX_LEN {
        return Err("Code length must be between 1 and 20 characters");
    }
    if !CODE_RE.is_match(code) {
        return Err("Code must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> std::result::Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name cannot be empty");
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err("Name must be at most 200 characters");
    }
    Ok(())
}
