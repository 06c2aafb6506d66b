use std::collections::HashMap;
use std::sync::Arc;

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

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

/// 创建存储后端并执行迁移
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}

/// 重新提交的结果：新的提交记录与被替换文件的存储名（提交后再从磁盘删除）
#[derive(Debug)]
pub struct SubmissionUpsert {
    pub submission: Submission,
    pub replaced_files: Vec<String>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，邮箱重复时返回 Conflict
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 按姓名/邮箱/ID 子串检索学生，可排除某班级已选课的学生
    async fn search_students(
        &self,
        query: &str,
        exclude_class_id: Option<&str>,
        limit: u64,
    ) -> Result<Vec<User>>;

    /// 专业
    async fn list_careers(&self) -> Result<Vec<Career>>;
    async fn get_career_by_id(&self, id: &str) -> Result<Option<Career>>;

    /// 班级管理方法
    // 创建班级，邀请码冲突时重试
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: &str) -> Result<Option<Class>>;
    // 班级详情（含专业、教师名称与学生数量）
    async fn get_class_detail(&self, class_id: &str) -> Result<Option<ClassResponse>>;
    // 教师任课的班级
    async fn list_classes_for_teacher(&self, teacher_id: &str) -> Result<Vec<ClassResponse>>;
    // 学生已选课的班级
    async fn list_classes_for_student(&self, student_id: &str) -> Result<Vec<ClassResponse>>;

    /// 访问控制
    async fn is_teacher_of(&self, class_id: &str, user_id: &str) -> Result<bool>;
    async fn is_enrolled_in(&self, class_id: &str, user_id: &str) -> Result<bool>;

    /// 主题
    async fn create_topic(
        &self,
        class_id: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<Topic>;
    async fn get_topic_by_id(&self, topic_id: &str) -> Result<Option<Topic>>;
    async fn list_topics_by_class(&self, class_id: &str) -> Result<Vec<Topic>>;

    /// 选课
    // 重复选课返回 Conflict
    async fn create_enrollment(&self, class_id: &str, student_id: &str) -> Result<Enrollment>;
    async fn delete_enrollment(&self, class_id: &str, student_id: &str) -> Result<bool>;
    async fn list_class_students(&self, class_id: &str) -> Result<Vec<EnrolledStudent>>;

    /// 公告
    async fn create_announcement(
        &self,
        announcement: NewAnnouncement,
        files: &[StoredFile],
    ) -> Result<Announcement>;
    async fn get_announcement_by_id(&self, id: &str) -> Result<Option<Announcement>>;
    async fn list_announcements_by_class(&self, class_id: &str) -> Result<Vec<Announcement>>;
    // 删除公告及附件记录，返回附件存储名；不存在时返回 None
    async fn delete_announcement(&self, id: &str) -> Result<Option<Vec<String>>>;

    /// 作业
    async fn create_assignment(
        &self,
        assignment: NewAssignment,
        files: &[StoredFile],
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: &str) -> Result<Option<Assignment>>;
    async fn list_assignments_by_class(&self, class_id: &str) -> Result<Vec<Assignment>>;
    // 学生所有已选班级的作业，附带班级名称
    async fn list_assignments_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<(Assignment, Option<String>)>>;
    // 每个作业的提交数量
    async fn count_submissions(&self, assignment_ids: &[String]) -> Result<HashMap<String, i64>>;

    /// 提交与批改
    async fn upsert_submission(
        &self,
        assignment_id: &str,
        student_id: &str,
        comment: Option<String>,
        files: &[StoredFile],
    ) -> Result<SubmissionUpsert>;
    async fn get_submission_by_id(&self, id: &str) -> Result<Option<Submission>>;
    async fn list_submissions_by_assignment(&self, assignment_id: &str)
    -> Result<Vec<Submission>>;
    // 学生在给定作业上的提交
    async fn list_student_submissions(
        &self,
        student_id: &str,
        assignment_ids: &[String],
    ) -> Result<Vec<Submission>>;
    async fn grade_submission(
        &self,
        id: &str,
        grade: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;

    /// 资料
    async fn create_material(
        &self,
        material: NewMaterial,
        files: &[StoredFile],
    ) -> Result<Material>;
    async fn get_material_by_id(&self, id: &str) -> Result<Option<Material>>;
    async fn list_materials_by_class(&self, class_id: &str) -> Result<Vec<Material>>;
}
