pub mod announcements;
pub mod assignments;
pub mod auth;
pub mod careers;
pub mod classes;
pub mod enrollments;
pub mod materials;
pub mod system;
pub mod topics;

pub use announcements::configure_announcements_routes;
pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use careers::configure_careers_routes;
pub use classes::configure_classes_routes;
pub use enrollments::configure_enrollments_routes;
pub use materials::configure_materials_routes;
pub use system::{configure_system_routes, configure_upload_routes};
pub use topics::configure_topics_routes;

use actix_web::web;

/// 全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_system_routes)
        .configure(configure_auth_routes)
        .configure(configure_careers_routes)
        .configure(configure_classes_routes)
        .configure(configure_topics_routes)
        .configure(configure_enrollments_routes)
        .configure(configure_announcements_routes)
        .configure(configure_assignments_routes)
        .configure(configure_materials_routes);
}
