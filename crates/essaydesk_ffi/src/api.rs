//! FFI use-case API for the mobile UI shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core view models and notices into FFI-friendly envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures come back as envelopes carrying the user-facing notice.
//!
//! # See also
//! - essaydesk_core::error for the failure-to-notice policy.

use essaydesk_core::db::open_db;
use essaydesk_core::error::ERROR_NOTICE_TITLE;
use essaydesk_core::service::argument::GENERATION_FAILED_TEXT;
use essaydesk_core::service::export::{
    build_export_file, write_export_file, EXPORT_MIME, EXPORT_SUCCESS_MESSAGE,
    EXPORT_SUCCESS_TITLE,
};
use essaydesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    report_failure, template_columns as template_columns_inner, ArgumentComposer, BackendClient,
    CoreConfig, EssayCard, EssayListPresenter, EssayListView, EssayRecord, EssayStore, FailureKind,
    KvError, NavigationRequest, ScreenLifecycle, SqliteKvStore, StoreError, SubmitRejected,
    TemplatePicker, UserNotice,
};
use log::info;
use rusqlite::Connection;
use std::path::Path;
use std::sync::OnceLock;

const SAVED_TITLE: &str = "Salvo";
const SAVED_MESSAGE: &str = "Sua redação foi salva com sucesso!";

static CORE_CONFIG: OnceLock<CoreConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// User-facing notice rendered by the shell as a modal alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeItem {
    pub is_error: bool,
    pub title: String,
    pub message: String,
}

impl From<UserNotice> for NoticeItem {
    fn from(value: UserNotice) -> Self {
        Self {
            is_error: value.is_error(),
            title: value.title,
            message: value.message,
        }
    }
}

/// Summary card for one saved essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayCardItem {
    pub id: String,
    pub title: String,
    pub summary: String,
}

/// One grid row; `right` is empty for an odd trailing essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayRowItem {
    pub left: EssayCardItem,
    pub right: Option<EssayCardItem>,
}

/// Saved-essay screen envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayGridResponse {
    /// Rows in newest-first order.
    pub rows: Vec<EssayRowItem>,
    /// Placeholder text shown instead of the grid when set.
    pub empty_message: Option<String>,
}

/// Generic action response envelope for essay mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected essay id on success.
    pub essay_id: Option<String>,
    pub notice: NoticeItem,
}

impl EssayActionResponse {
    fn success(essay_id: String, notice: UserNotice) -> Self {
        Self {
            ok: true,
            essay_id: Some(essay_id),
            notice: notice.into(),
        }
    }

    fn failure(notice: UserNotice) -> Self {
        Self {
            ok: false,
            essay_id: None,
            notice: notice.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavParam {
    pub key: String,
    pub value: String,
}

/// Route path plus parameters for the shell router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub path: String,
    pub params: Vec<NavParam>,
}

impl From<NavigationRequest> for NavigationItem {
    fn from(value: NavigationRequest) -> Self {
        Self {
            path: value.route.path().to_string(),
            params: value
                .params
                .into_iter()
                .map(|(key, value)| NavParam { key, value })
                .collect(),
        }
    }
}

/// Native export envelope; the shell opens its share sheet on `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFileResponse {
    pub ok: bool,
    pub path: Option<String>,
    pub notice: NoticeItem,
}

/// Browser export envelope; the shell triggers a download of `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBytesResponse {
    pub ok: bool,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// Set only on failure.
    pub notice: Option<NoticeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub body_text: String,
}

/// Template picker envelope. `items` is empty when the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateListResponse {
    pub items: Vec<TemplateItem>,
    pub notice: Option<NoticeItem>,
}

/// Argument generation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentResponse {
    /// False when the theme was rejected before any request.
    pub accepted: bool,
    /// Generated essay, or the fixed failure text.
    pub text: String,
    pub notice: Option<NoticeItem>,
}

/// Loads the saved-essay grid as on screen focus.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unreadable storage renders as the empty placeholder.
#[flutter_rust_bridge::frb(sync)]
pub fn essays_grid() -> EssayGridResponse {
    let view = match with_essay_list(|presenter| presenter.view()) {
        Ok(view) => view,
        Err(notice) => {
            return EssayGridResponse {
                rows: Vec::new(),
                empty_message: Some(notice.message),
            }
        }
    };

    match view {
        EssayListView::Empty { message } => EssayGridResponse {
            rows: Vec::new(),
            empty_message: Some(message.to_string()),
        },
        EssayListView::Grid { rows } => EssayGridResponse {
            rows: rows
                .into_iter()
                .map(|row| EssayRowItem {
                    left: to_card_item(row.left),
                    right: row.right.map(to_card_item),
                })
                .collect(),
            empty_message: None,
        },
    }
}

/// Navigation request opening one essay's detail view.
///
/// Returns `None` when the id is unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn essay_open(id: String) -> Option<NavigationItem> {
    with_essay_list(|presenter| presenter.open(id.as_str()))
        .ok()
        .flatten()
        .map(NavigationItem::from)
}

/// Appends a new essay written in an editor screen.
///
/// `id = None` generates a fresh id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; duplicate or blank ids return a failure envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn essay_save(id: Option<String>, title: String, text: String) -> EssayActionResponse {
    let record = match id {
        Some(id) => match EssayRecord::with_id(id, title, text) {
            Ok(record) => record,
            Err(err) => {
                let err = StoreError::from(err);
                return EssayActionResponse::failure(report_failure(
                    err.kind(),
                    "ffi",
                    "essay_save",
                    &err,
                ));
            }
        },
        None => EssayRecord::new(title, text),
    };

    let saved = with_store_conn(|conn| {
        EssayStore::new(SqliteKvStore::new(conn))
            .save(&record)
            .map_err(|err| report_failure(err.kind(), "ffi", "essay_save", &err))
    })
    .and_then(|result| result);

    match saved {
        Ok(()) => {
            EssayActionResponse::success(record.id, UserNotice::info(SAVED_TITLE, SAVED_MESSAGE))
        }
        Err(notice) => EssayActionResponse::failure(notice),
    }
}

/// Deletes one essay; the shell reloads the grid afterwards.
#[flutter_rust_bridge::frb(sync)]
pub fn essay_delete(id: String) -> EssayActionResponse {
    match with_essay_list(|presenter| presenter.delete(id.as_str())) {
        Ok(notice) if !notice.is_error() => EssayActionResponse::success(id, notice),
        Ok(notice) | Err(notice) => EssayActionResponse::failure(notice),
    }
}

/// Writes `{title}.txt` for a saved essay into `documents_dir`.
///
/// # FFI contract
/// - Sync call, file-system bound.
/// - The shell presents the share sheet for the returned path.
#[flutter_rust_bridge::frb(sync)]
pub fn essay_export_file(id: String, documents_dir: String) -> ExportFileResponse {
    let written = find_essay(id.as_str()).and_then(|essay| {
        write_export_file(Path::new(documents_dir.trim()), &essay.title, &essay.text)
            .map_err(|err| report_failure(FailureKind::FileExport, "ffi", "essay_export", &err))
    });

    match written {
        Ok(path) => {
            info!("event=essay_export module=ffi status=ok target=file");
            ExportFileResponse {
                ok: true,
                path: Some(path.to_string_lossy().into_owned()),
                notice: UserNotice::info(EXPORT_SUCCESS_TITLE, EXPORT_SUCCESS_MESSAGE).into(),
            }
        }
        Err(notice) => ExportFileResponse {
            ok: false,
            path: None,
            notice: notice.into(),
        },
    }
}

/// Builds the download payload for a saved essay in browser-style hosts.
#[flutter_rust_bridge::frb(sync)]
pub fn essay_export_bytes(id: String) -> ExportBytesResponse {
    let built = find_essay(id.as_str()).and_then(|essay| {
        build_export_file(&essay.title, &essay.text)
            .map_err(|err| report_failure(FailureKind::FileExport, "ffi", "essay_export", &err))
    });

    match built {
        Ok(file) => {
            info!("event=essay_export module=ffi status=ok target=bytes");
            ExportBytesResponse {
                ok: true,
                file_name: file.file_name,
                mime: EXPORT_MIME.to_string(),
                bytes: file.contents,
                notice: None,
            }
        }
        Err(notice) => ExportBytesResponse {
            ok: false,
            file_name: String::new(),
            mime: EXPORT_MIME.to_string(),
            bytes: Vec::new(),
            notice: Some(notice.into()),
        },
    }
}

/// Template grid column count for a viewport width.
#[flutter_rust_bridge::frb(sync)]
pub fn template_columns(width: f64) -> u32 {
    u32::try_from(template_columns_inner(width)).unwrap_or(1)
}

/// Fetches the template list once, as on picker mount.
///
/// # FFI contract
/// - Async call; FRB runs it off the UI isolate.
/// - Never panics; a failed fetch returns no items and an error notice.
pub async fn templates_fetch() -> TemplateListResponse {
    match backend_client() {
        Ok(backend) => load_templates(&backend).await,
        Err(notice) => TemplateListResponse {
            items: Vec::new(),
            notice: Some(notice.into()),
        },
    }
}

/// Requests an argumentative essay for `theme`.
///
/// # FFI contract
/// - Async call; FRB runs it off the UI isolate.
/// - A blank theme is rejected without a request.
pub async fn argument_generate(theme: String) -> ArgumentResponse {
    match backend_client() {
        Ok(backend) => compose_argument(&backend, theme).await,
        Err(notice) => ArgumentResponse {
            accepted: true,
            text: GENERATION_FAILED_TEXT.to_string(),
            notice: Some(notice.into()),
        },
    }
}

async fn load_templates(backend: &BackendClient) -> TemplateListResponse {
    let mut picker = TemplatePicker::new();
    picker.mount(backend).await;
    TemplateListResponse {
        items: picker
            .templates()
            .iter()
            .map(|template| TemplateItem {
                id: template.id.clone(),
                title: template.title.clone(),
                image_url: template.image_url.clone(),
                body_text: template.body_text.clone(),
            })
            .collect(),
        notice: picker.notice().cloned().map(NoticeItem::from),
    }
}

async fn compose_argument(backend: &BackendClient, theme: String) -> ArgumentResponse {
    let mut composer = ArgumentComposer::new();
    composer.on_focus();
    composer.set_theme(theme);

    match composer.submit(backend).await {
        Ok(()) => ArgumentResponse {
            accepted: true,
            text: composer.response().to_string(),
            notice: None,
        },
        Err(SubmitRejected::EmptyTheme(notice)) => ArgumentResponse {
            accepted: false,
            text: String::new(),
            notice: Some(notice.into()),
        },
        Err(SubmitRejected::Busy) => ArgumentResponse {
            accepted: false,
            text: String::new(),
            notice: None,
        },
    }
}

fn core_config() -> &'static CoreConfig {
    CORE_CONFIG.get_or_init(CoreConfig::from_env)
}

fn with_store_conn<T>(f: impl FnOnce(&Connection) -> T) -> Result<T, UserNotice> {
    let conn = open_db(&core_config().db_path).map_err(|err| {
        report_failure(
            FailureKind::StorageRead,
            "ffi",
            "store_open",
            &KvError::from(err),
        )
    })?;
    Ok(f(&conn))
}

fn with_essay_list<T>(
    f: impl FnOnce(&mut EssayListPresenter<SqliteKvStore<'_>>) -> T,
) -> Result<T, UserNotice> {
    with_store_conn(|conn| {
        let mut presenter = EssayListPresenter::new(EssayStore::new(SqliteKvStore::new(conn)));
        presenter.on_focus();
        f(&mut presenter)
    })
}

fn backend_client() -> Result<BackendClient, UserNotice> {
    BackendClient::from_config(core_config())
        .map_err(|err| report_failure(err.kind(), "ffi", "backend_init", &err))
}

fn find_essay(id: &str) -> Result<EssayRecord, UserNotice> {
    let found = with_store_conn(|conn| {
        EssayStore::new(SqliteKvStore::new(conn))
            .get(id)
            .map_err(|err| report_failure(err.kind(), "ffi", "essay_get", &err))
    })??;
    found.ok_or_else(|| UserNotice::error(ERROR_NOTICE_TITLE, FailureKind::FileExport.user_message()))
}

fn to_card_item(card: EssayCard) -> EssayCardItem {
    EssayCardItem {
        id: card.id,
        title: card.title,
        summary: card.summary,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        argument_generate, compose_argument, core_version, essay_delete, essay_export_bytes,
        essay_export_file, essay_open, essay_save, essays_grid, init_logging, load_templates,
        ping, template_columns,
    };
    use essaydesk_core::service::argument::GENERATION_FAILED_TEXT;
    use essaydesk_core::BackendClient;
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    // Save and delete rewrite one shared key.
    static STORE_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn saved_essay_shows_up_in_grid_and_opens() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let token = unique_token("grid");
        let saved = essay_save(None, format!("Título {token}"), "corpo".to_string());
        assert!(saved.ok, "{}", saved.notice.message);
        let id = saved.essay_id.expect("saved essay should return essay_id");

        let grid = essays_grid();
        assert!(grid.empty_message.is_none());
        let first = &grid.rows[0].left;
        assert_eq!(first.id, id);
        assert_eq!(first.title, format!("Título {token}"));

        let nav = essay_open(id.clone()).expect("saved essay should open");
        assert_eq!(nav.path, "/visualizacao");
        assert!(nav
            .params
            .iter()
            .any(|param| param.key == "id" && param.value == id));

        assert!(essay_delete(id).ok);
    }

    #[test]
    fn essay_save_rejects_duplicate_and_blank_ids() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = unique_token("dup");
        assert!(essay_save(Some(id.clone()), "a".to_string(), "b".to_string()).ok);

        let duplicate = essay_save(Some(id.clone()), "c".to_string(), "d".to_string());
        assert!(!duplicate.ok);
        assert!(duplicate.notice.is_error);

        let blank = essay_save(Some("  ".to_string()), "c".to_string(), "d".to_string());
        assert!(!blank.ok);

        assert!(essay_delete(id).ok);
    }

    #[test]
    fn deleted_essay_no_longer_opens() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = unique_token("delete");
        assert!(essay_save(Some(id.clone()), "t".to_string(), "x".to_string()).ok);

        let deleted = essay_delete(id.clone());
        assert!(deleted.ok);
        assert_eq!(deleted.notice.title, "Excluído");
        assert!(essay_open(id).is_none());
    }

    #[test]
    fn export_file_writes_title_named_text_file() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let dir = tempfile::tempdir().expect("tempdir");
        let id = unique_token("export");
        assert!(essay_save(Some(id.clone()), "Minha".to_string(), "ção\n".to_string()).ok);

        let exported = essay_export_file(id.clone(), dir.path().to_string_lossy().into_owned());
        assert!(exported.ok, "{}", exported.notice.message);
        let path = exported.path.expect("export should return path");
        assert!(path.ends_with("Minha.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), "ção\n".as_bytes());

        let bytes = essay_export_bytes(id.clone());
        assert!(bytes.ok);
        assert_eq!(bytes.file_name, "Minha.txt");
        assert_eq!(bytes.mime, "text/plain");
        assert_eq!(bytes.bytes, "ção\n".as_bytes());

        assert!(essay_delete(id).ok);
    }

    #[test]
    fn export_of_unknown_essay_fails_with_notice() {
        let response = essay_export_bytes(unique_token("missing"));
        assert!(!response.ok);
        let notice = response.notice.expect("failure should carry a notice");
        assert!(notice.is_error);
        assert_eq!(notice.message, "Não foi possível baixar o arquivo.");
    }

    #[test]
    fn template_columns_follow_breakpoints() {
        assert_eq!(template_columns(480.0), 1);
        assert_eq!(template_columns(768.0), 2);
        assert_eq!(template_columns(1024.0), 4);
    }

    #[tokio::test]
    async fn argument_generate_rejects_blank_theme_without_request() {
        let response = argument_generate("   ".to_string()).await;
        assert!(!response.accepted);
        let notice = response.notice.expect("blank theme should be explained");
        assert_eq!(notice.message, "Por favor, insira um tema.");
    }

    #[tokio::test]
    async fn unreachable_backend_yields_empty_templates_and_notice() {
        let response = load_templates(&closed_port_client()).await;
        assert!(response.items.is_empty());
        let notice = response.notice.expect("failed fetch should carry a notice");
        assert!(notice.is_error);
    }

    #[tokio::test]
    async fn unreachable_backend_degrades_generation_to_fixed_text() {
        let response = compose_argument(&closed_port_client(), "energia".to_string()).await;
        assert!(response.accepted);
        assert_eq!(response.text, GENERATION_FAILED_TEXT);
    }

    fn closed_port_client() -> BackendClient {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        BackendClient::new(&format!("http://{addr}"), Duration::from_secs(2)).expect("client")
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        format!("{prefix}-{}-{nanos}", std::process::id())
    }
}
