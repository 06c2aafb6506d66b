//! 预导入模块，方便使用

pub use super::announcement_attachments::{
    ActiveModel as AnnouncementAttachmentActiveModel, Entity as AnnouncementAttachments,
    Model as AnnouncementAttachmentModel,
};
pub use super::announcements::{
    ActiveModel as AnnouncementActiveModel, Entity as Announcements, Model as AnnouncementModel,
};
pub use super::assignment_attachments::{
    ActiveModel as AssignmentAttachmentActiveModel, Entity as AssignmentAttachments,
    Model as AssignmentAttachmentModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::careers::{ActiveModel as CareerActiveModel, Entity as Careers, Model as CareerModel};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::material_attachments::{
    ActiveModel as MaterialAttachmentActiveModel, Entity as MaterialAttachments,
    Model as MaterialAttachmentModel,
};
pub use super::materials::{
    ActiveModel as MaterialActiveModel, Entity as Materials, Model as MaterialModel,
};
pub use super::submission_files::{
    ActiveModel as SubmissionFileActiveModel, Entity as SubmissionFiles,
    Model as SubmissionFileModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::topics::{ActiveModel as TopicActiveModel, Entity as Topics, Model as TopicModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
