use crate::config::AppConfig;
use crate::errors::{CourseSystemError, Result};
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .map_err(|_| CourseSystemError::token("Invalid subject in token"))
    }
}

// Token 对
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn encoding_key() -> EncodingKey {
        EncodingKey::from_secret(AppConfig::get().jwt.secret.as_bytes())
    }

    fn decoding_key() -> DecodingKey {
        DecodingKey::from_secret(AppConfig::get().jwt.secret.as_bytes())
    }

    /// Access Token 有效期（秒）
    pub fn access_token_expires_in() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    /// 记住我时使用更长的 Refresh Token 有效期
    pub fn refresh_token_expiry(remember_me: bool) -> chrono::Duration {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            chrono::Duration::days(jwt.refresh_token_remember_me_expiry)
        } else {
            chrono::Duration::days(jwt.refresh_token_expiry)
        }
    }

    // 生成带自定义过期时间的 Token
    fn generate_token(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &Self::encoding_key())?)
    }

    pub fn generate_access_token(user_id: i64, role: &str) -> Result<String> {
        Self::generate_token(
            user_id,
            role,
            ACCESS,
            chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry),
        )
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair> {
        let access_token = Self::generate_access_token(user_id, role)?;
        let refresh_token = Self::generate_token(
            user_id,
            role,
            REFRESH,
            refresh_token_expiry.unwrap_or_else(|| Self::refresh_token_expiry(false)),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 token 并检查类型
    fn verify_token_type(token: &str, expected_type: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &Self::decoding_key(), &Validation::default())?.claims;
        if claims.token_type != expected_type {
            return Err(CourseSystemError::token(format!(
                "Expected {expected_type} token"
            )));
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims> {
        Self::verify_token_type(token, ACCESS)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims> {
        Self::verify_token_type(token, REFRESH)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        expiry: chrono::Duration,
    ) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_TOKEN_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                expiry.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}
