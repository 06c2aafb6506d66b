//! 配置管理
//!
//! 加载顺序：`config.toml` → `config.{APP_ENV}.toml` → `CLASSCONNECT__*` 环境变量 →
//! 常用的裸环境变量（`DB_HOST`、`JWT_SECRET`、`PORT` 等）。

mod r#impl;
mod structs;

pub use structs::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, JwtConfig, LimitConfig, ServerConfig,
    TimeoutConfig, UploadConfig,
};
