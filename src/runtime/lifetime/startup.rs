use crate::errors::{CourseSystemError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号
pub async fn seed_admin(storage: &dyn Storage) -> Result<()> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!(
            "Database already has {} user(s), skipping admin seed",
            count
        );
        return Ok(());
    }
    info!("No users found in database, creating default admin account...");

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let user = storage
        .create_user(NewUser {
            username: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password_hash: hash_password(&password)?,
            role: UserRole::Admin,
            display_name: Some("Administrator".to_string()),
        })
        .await?;

    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        user.id, user.username
    );
    Ok(())
}

/// 准备服务器启动的上下文：加密库、存储与迁移、默认管理员
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| CourseSystemError::database_config("Failed to install rustls crypto provider"))?;

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    if let Err(e) = seed_admin(storage.as_ref()).await {
        warn!("Failed to seed admin account: {}", e);
    }

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_password() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }
}
