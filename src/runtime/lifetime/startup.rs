use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{ClassConnectError, Result};
use crate::models::AppStartTime;
use crate::services::FileStorage;
use crate::storage::Storage;
use crate::utils::jwt::JwtService;

/// 服务运行期间共享的状态
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub files: FileStorage,
    pub jwt: JwtService,
    pub start_time: AppStartTime,
}

impl StartupContext {
    /// 由配置构建：连接数据库并执行迁移、准备上传目录、创建令牌服务
    pub async fn from_config(config: &AppConfig, start_time: AppStartTime) -> Result<Self> {
        let storage = crate::storage::create_storage(&config.database).await?;
        warn!("Storage backend initialized and migrations completed");

        let files = FileStorage::new(&config.upload);
        tokio::fs::create_dir_all(files.dir()).await.map_err(|e| {
            ClassConnectError::file_operation(format!(
                "创建上传目录 {} 失败: {e}",
                files.dir().display()
            ))
        })?;
        info!("Uploads are stored in {}", files.dir().display());

        let expiry = config
            .jwt
            .expiry()
            .map_err(|e| ClassConnectError::validation(e.to_string()))?;
        let jwt = JwtService::new(&config.jwt.secret, expiry);

        Ok(Self {
            storage,
            files,
            jwt,
            start_time,
        })
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(start_time: AppStartTime) -> StartupContext {
    let config = AppConfig::get();
    StartupContext::from_config(config, start_time)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Failed to prepare server startup: {e}");
            std::process::exit(1);
        })
}
