//! Failure taxonomy and the catch-log-notify policy.
//!
//! # Responsibility
//! - Classify failures into the four user-facing kinds.
//! - Log each failure once, at the point it is caught, as a structured event.
//! - Convert failures into non-blocking `UserNotice`s.
//!
//! # Invariants
//! - Reporting never panics and never propagates the error further.
//! - No retries are performed; the user re-triggers the action.

use crate::logging::sanitize_message;
use crate::notice::UserNotice;
use log::error;
use std::error::Error;

const MAX_LOGGED_ERROR_CHARS: usize = 240;

pub const ERROR_NOTICE_TITLE: &str = "Erro";

/// User-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    StorageRead,
    StorageWrite,
    Network,
    FileExport,
}

impl FailureKind {
    /// Stable label used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StorageRead => "storage_read",
            Self::StorageWrite => "storage_write",
            Self::Network => "network",
            Self::FileExport => "file_export",
        }
    }

    /// Default message shown to the user for this kind.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::StorageRead => "Não foi possível carregar suas redações.",
            Self::StorageWrite => "Não foi possível salvar as alterações.",
            Self::Network => "Não foi possível conectar ao servidor.",
            Self::FileExport => "Não foi possível baixar o arquivo.",
        }
    }
}

/// Logs a caught failure and returns the notice to show.
pub fn report_failure(
    kind: FailureKind,
    module: &str,
    event: &str,
    err: &(dyn Error + 'static),
) -> UserNotice {
    log_failure(kind, module, event, err);
    UserNotice::error(ERROR_NOTICE_TITLE, kind.user_message())
}

/// Logs a caught failure without producing a notice.
pub fn log_failure(kind: FailureKind, module: &str, event: &str, err: &(dyn Error + 'static)) {
    error!(
        "event={event} module={module} status=error kind={} error={}",
        kind.as_str(),
        sanitize_message(&error_chain(err), MAX_LOGGED_ERROR_CHARS)
    );
}

fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !rendered.ends_with(cause_text.as_str()) {
            rendered.push_str(": ");
            rendered.push_str(&cause_text);
        }
        source = cause.source();
    }
    rendered
}
