//! 应用装配：共享状态、参数错误处理器与全部路由

use actix_web::web;

use crate::routes;
use crate::runtime::lifetime::startup::StartupContext;
use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

/// 注册共享状态与路由，`main` 与集成测试共用
pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext, max_payload_size: usize) {
    let upload_dir = ctx.files.dir().to_path_buf();

    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler)) // 设置查询参数错误处理器
        .app_data(web::JsonConfig::default().error_handler(json_error_handler)) // 设置JSON错误处理器
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::PayloadConfig::new(max_payload_size)) // 设置最大请求体大小
        .app_data(web::Data::new(ctx.storage.clone()))
        .app_data(web::Data::new(ctx.files.clone()))
        .app_data(web::Data::new(ctx.jwt.clone()))
        .app_data(web::Data::new(ctx.start_time))
        .configure(routes::configure_api_routes)
        .configure(|cfg| routes::configure_upload_routes(cfg, &upload_dir));
}
