//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcement_attachments;
pub mod announcements;
pub mod assignment_attachments;
pub mod assignments;
pub mod careers;
pub mod classes;
pub mod enrollments;
pub mod material_attachments;
pub mod materials;
pub mod submission_files;
pub mod submissions;
pub mod topics;
pub mod users;
