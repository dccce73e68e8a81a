//! User-visible, non-blocking notifications.
//!
//! Presenters never surface raw errors to the UI shell; every outcome the
//! user should see is a `UserNotice` the shell renders as an alert or an
//! inline message.

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Title + message pair rendered by the UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl UserNotice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
