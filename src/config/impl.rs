use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;
use std::time::Duration;

use super::{AppConfig, DatabaseConfig, JwtConfig};
use crate::utils::jwt::parse_ttl;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖，例如 CLASSCONNECT__DATABASE__POOL_SIZE
            .add_source(
                Environment::with_prefix("CLASSCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从常用环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("jwt.expires_in", std::env::var("JWT_EXPIRES_IN").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("database.host", std::env::var("DB_HOST").ok())?
            .set_override_option("database.port", std::env::var("DB_PORT").ok())?
            .set_override_option("database.user", std::env::var("DB_USER").ok())?
            .set_override_option("database.password", std::env::var("DB_PASSWORD").ok())?
            .set_override_option("database.name", std::env::var("DB_NAME").ok())?
            .set_override_option("upload.dir", std::env::var("UPLOAD_DIR").ok())?
            .set_override_option("upload.max_size", std::env::var("MAX_FILE_SIZE").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// 启动前校验：缺少签名密钥时拒绝启动
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret is empty; set JWT_SECRET".to_string(),
            ));
        }
        self.jwt.expiry()?;
        if self.upload.max_files == 0 {
            return Err(ConfigError::Message(
                "upload.max_files must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

impl JwtConfig {
    /// 令牌有效期
    pub fn expiry(&self) -> Result<chrono::Duration, ConfigError> {
        parse_ttl(&self.expires_in).ok_or_else(|| {
            ConfigError::Message(format!(
                "invalid jwt.expires_in '{}', expected e.g. 3600, 30m, 12h, 1d",
                self.expires_in
            ))
        })
    }
}

impl DatabaseConfig {
    /// 最终使用的连接串
    pub fn connection_url(&self) -> String {
        if !self.url.trim().is_empty() {
            return self.url.trim().to_string();
        }
        if !self.host.trim().is_empty() {
            let credentials = if self.password.is_empty() {
                self.user.clone()
            } else {
                format!("{}:{}", self.user, self.password)
            };
            return format!(
                "mysql://{}@{}:{}/{}",
                credentials, self.host, self.port, self.name
            );
        }
        format!("sqlite://{}.db?mode=rwc", self.name)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.database.pool_size, 10);
        assert_eq!(config.upload.max_size, 5 * 1024 * 1024);
        assert_eq!(config.upload.max_files, 5);
        assert_eq!(config.jwt.expires_in, "1d");
        assert_eq!(
            config.upload.allowed_types,
            vec!["image/jpeg", "image/png", "image/gif", "application/pdf"]
        );
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_err());

        config.jwt.secret = "not-empty".to_string();
        assert!(config.validate().is_ok());

        config.jwt.expires_in = "soon".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn connection_url_prefers_explicit_url() {
        let mut db = DatabaseConfig {
            url: "postgres://u:p@db/app".to_string(),
            host: "ignored".to_string(),
            ..DatabaseConfig::default()
        };
        assert_eq!(db.connection_url(), "postgres://u:p@db/app");

        db.url.clear();
        db.password = "pw".to_string();
        assert_eq!(
            db.connection_url(),
            "mysql://root:pw@ignored:3306/classconnect"
        );

        db.host.clear();
        assert_eq!(db.connection_url(), "sqlite://classconnect.db?mode=rwc");
    }
}
