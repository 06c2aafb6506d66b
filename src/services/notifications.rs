//! 班级通知
//!
//! 目前只写日志，不做投递。

use tracing::info;

#[derive(Debug, Clone, Copy)]
pub enum NotificationKind {
    Announcement,
    Assignment,
    Material,
    Grade,
}

impl NotificationKind {
    fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Announcement => "announcement",
            NotificationKind::Assignment => "assignment",
            NotificationKind::Material => "material",
            NotificationKind::Grade => "grade",
        }
    }
}

/// 通知班级全体成员
pub fn notify_class(kind: NotificationKind, class_id: &str, title: &str) {
    info!(
        target: "notification",
        kind = kind.as_str(),
        class_id,
        "New {} in class {}: {}",
        kind.as_str(),
        class_id,
        title
    );
}

/// 通知单个用户
pub fn notify_user(kind: NotificationKind, user_id: &str, title: &str) {
    info!(
        target: "notification",
        kind = kind.as_str(),
        user_id,
        "Notify {} about {}: {}",
        user_id,
        kind.as_str(),
        title
    );
}
