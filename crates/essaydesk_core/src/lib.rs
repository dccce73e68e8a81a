//! Core logic for EssayDesk, a writing-assistant client.
//! Screens in the UI shell render the view models produced here and hand
//! user actions back; storage, export and backend access stay in this crate.

pub mod config;
pub mod db;
pub mod error;
pub mod kv;
pub mod logging;
pub mod model;
pub mod nav;
pub mod notice;
pub mod remote;
pub mod repo;
pub mod screen;
pub mod service;

pub use config::CoreConfig;
pub use error::{report_failure, FailureKind};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogSettings};
pub use model::essay::{EssayId, EssayRecord, EssayValidationError};
pub use model::template::TemplateRecord;
pub use nav::{NavigationRequest, Route};
pub use notice::{NoticeLevel, UserNotice};
pub use remote::backend::{BackendClient, BackendError, BackendResult, EssayBackend};
pub use repo::essay_store::{EssayStore, StoreError, StoreResult, ESSAYS_KEY};
pub use screen::{Liveness, LivenessToken, ScreenLifecycle};
pub use service::argument::{ArgumentComposer, GenerationTicket, SubmitRejected};
pub use service::essay_list::{EssayCard, EssayListPresenter, EssayListView, EssayRow};
pub use service::export::{
    BrowserDownload, DownloadTrigger, ExportError, ExportFile, ExportReceipt, ExportService,
    NoShareSheet, ShareSheet,
};
pub use service::grid::{chunk_rows, newest_first, template_columns};
pub use service::template_picker::{TemplateCard, TemplatePicker};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
