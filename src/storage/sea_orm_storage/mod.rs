//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 多行写入都在事务中完成：事务内只使用 `txn`，未提交的事务在 drop 时回滚。

mod announcements;
mod assignments;
mod careers;
mod classes;
mod enrollments;
mod materials;
mod submissions;
mod topics;
mod users;

use std::collections::HashMap;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::errors::{ClassConnectError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use tracing::info;

/// SeaORM 存储实例
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.connection_url())?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassConnectError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized: {}", redact_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");
        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassConnectError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        // 内存库不支持 WAL
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(config.connect_timeout());

        // 内存库随连接关闭而消失，保持连接常驻
        pool = if in_memory {
            pool.idle_timeout(None).max_lifetime(None)
        } else {
            pool.idle_timeout(Duration::from_secs(300))
        };

        let pool = pool.connect_with(opt).await.map_err(|e| {
            ClassConnectError::database_connection(format!("SQLite 连接失败: {e}"))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size.max(1))
            .min_connections(1)
            .connect_timeout(config.connect_timeout())
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            ClassConnectError::database_connection(format!("无法连接到数据库: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassConnectError::database_config(format!(
                "无法从 URL 推断数据库类型: {}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径",
                redact_url(url)
            )))
        }
    }
}

/// 日志中隐藏连接串里的密码
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

/// 唯一约束冲突
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// 把附件行按父 ID 分组
pub(crate) fn group_by_parent<T>(
    rows: Vec<T>,
    parent_of: impl Fn(&T) -> String,
) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(parent_of(&row)).or_default().push(row);
    }
    grouped
}

// Storage trait 实现
use crate::models::{
    announcements::{entities::Announcement, requests::NewAnnouncement},
    assignments::{
        entities::{Assignment, Submission},
        requests::NewAssignment,
    },
    careers::entities::Career,
    classes::{entities::Class, requests::NewClass, responses::ClassResponse},
    enrollments::{entities::Enrollment, responses::EnrolledStudent},
    files::entities::StoredFile,
    materials::{entities::Material, requests::NewMaterial},
    topics::entities::Topic,
    users::entities::{User, UserRole},
};
use crate::storage::{Storage, SubmissionUpsert};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User> {
        self.create_user_impl(name, email, password_hash, role)
            .await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn search_students(
        &self,
        query: &str,
        exclude_class_id: Option<&str>,
        limit: u64,
    ) -> Result<Vec<User>> {
        self.search_students_impl(query, exclude_class_id, limit)
            .await
    }

    // 专业模块
    async fn list_careers(&self) -> Result<Vec<Career>> {
        self.list_careers_impl().await
    }

    async fn get_career_by_id(&self, id: &str) -> Result<Option<Career>> {
        self.get_career_by_id_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: &str) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_detail(&self, class_id: &str) -> Result<Option<ClassResponse>> {
        self.get_class_detail_impl(class_id).await
    }

    async fn list_classes_for_teacher(&self, teacher_id: &str) -> Result<Vec<ClassResponse>> {
        self.list_classes_for_teacher_impl(teacher_id).await
    }

    async fn list_classes_for_student(&self, student_id: &str) -> Result<Vec<ClassResponse>> {
        self.list_classes_for_student_impl(student_id).await
    }

    async fn is_teacher_of(&self, class_id: &str, user_id: &str) -> Result<bool> {
        self.is_teacher_of_impl(class_id, user_id).await
    }

    async fn is_enrolled_in(&self, class_id: &str, user_id: &str) -> Result<bool> {
        self.is_enrolled_in_impl(class_id, user_id).await
    }

    // 主题模块
    async fn create_topic(
        &self,
        class_id: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<Topic> {
        self.create_topic_impl(class_id, name, description).await
    }

    async fn get_topic_by_id(&self, topic_id: &str) -> Result<Option<Topic>> {
        self.get_topic_by_id_impl(topic_id).await
    }

    async fn list_topics_by_class(&self, class_id: &str) -> Result<Vec<Topic>> {
        self.list_topics_by_class_impl(class_id).await
    }

    // 选课模块
    async fn create_enrollment(&self, class_id: &str, student_id: &str) -> Result<Enrollment> {
        self.create_enrollment_impl(class_id, student_id).await
    }

    async fn delete_enrollment(&self, class_id: &str, student_id: &str) -> Result<bool> {
        self.delete_enrollment_impl(class_id, student_id).await
    }

    async fn list_class_students(&self, class_id: &str) -> Result<Vec<EnrolledStudent>> {
        self.list_class_students_impl(class_id).await
    }

    // 公告模块
    async fn create_announcement(
        &self,
        announcement: NewAnnouncement,
        files: &[StoredFile],
    ) -> Result<Announcement> {
        self.create_announcement_impl(announcement, files).await
    }

    async fn get_announcement_by_id(&self, id: &str) -> Result<Option<Announcement>> {
        self.get_announcement_by_id_impl(id).await
    }

    async fn list_announcements_by_class(&self, class_id: &str) -> Result<Vec<Announcement>> {
        self.list_announcements_by_class_impl(class_id).await
    }

    async fn delete_announcement(&self, id: &str) -> Result<Option<Vec<String>>> {
        self.delete_announcement_impl(id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        assignment: NewAssignment,
        files: &[StoredFile],
    ) -> Result<Assignment> {
        self.create_assignment_impl(assignment, files).await
    }

    async fn get_assignment_by_id(&self, id: &str) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_class(&self, class_id: &str) -> Result<Vec<Assignment>> {
        self.list_assignments_by_class_impl(class_id).await
    }

    async fn list_assignments_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<(Assignment, Option<String>)>> {
        self.list_assignments_for_student_impl(student_id).await
    }

    async fn count_submissions(&self, assignment_ids: &[String]) -> Result<HashMap<String, i64>> {
        self.count_submissions_impl(assignment_ids).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: &str,
        student_id: &str,
        comment: Option<String>,
        files: &[StoredFile],
    ) -> Result<SubmissionUpsert> {
        self.upsert_submission_impl(assignment_id, student_id, comment, files)
            .await
    }

    async fn get_submission_by_id(&self, id: &str) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn list_student_submissions(
        &self,
        student_id: &str,
        assignment_ids: &[String],
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id, assignment_ids)
            .await
    }

    async fn grade_submission(
        &self,
        id: &str,
        grade: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, grade, feedback).await
    }

    // 资料模块
    async fn create_material(
        &self,
        material: NewMaterial,
        files: &[StoredFile],
    ) -> Result<Material> {
        self.create_material_impl(material, files).await
    }

    async fn get_material_by_id(&self, id: &str) -> Result<Option<Material>> {
        self.get_material_by_id_impl(id).await
    }

    async fn list_materials_by_class(&self, class_id: &str) -> Result<Vec<Material>> {
        self.list_materials_by_class_impl(class_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_inference() {
        assert_eq!(
            SeaOrmStorage::build_database_url("data/app.db").unwrap(),
            "sqlite://data/app.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("mysql://root@localhost/cc").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn redacts_password() {
        assert_eq!(
            redact_url("mysql://root:hunter2@db:3306/classconnect"),
            "mysql://root:***@db:3306/classconnect"
        );
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }
}
