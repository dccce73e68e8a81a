use essaydesk_core::service::export::{EXPORT_MIME, EXPORT_SUCCESS_MESSAGE, EXPORT_SUCCESS_TITLE};
use essaydesk_core::{
    BrowserDownload, DownloadTrigger, ExportError, ExportReceipt, ExportService, NoticeLevel,
    ShareSheet,
};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Clone, Default)]
struct RecordingDownload {
    seen: Rc<RefCell<Vec<BrowserDownload>>>,
}

impl DownloadTrigger for RecordingDownload {
    fn trigger(&self, download: &BrowserDownload) -> io::Result<()> {
        self.seen.borrow_mut().push(download.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingShare {
    shared: Rc<RefCell<Vec<PathBuf>>>,
}

impl ShareSheet for RecordingShare {
    fn share(&self, path: &Path) -> io::Result<()> {
        self.shared.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

struct BrokenShare;

impl ShareSheet for BrokenShare {
    fn share(&self, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "sharing unavailable"))
    }
}

#[test]
fn native_export_writes_title_txt_and_shares_it() {
    let dir = tempfile::tempdir().unwrap();
    let share = RecordingShare::default();
    let service = ExportService::native(dir.path(), share.clone());

    let receipt = service.try_export("T", "hello").unwrap();
    let expected = dir.path().join("T.txt");
    assert_eq!(receipt, ExportReceipt::Shared { path: expected.clone() });
    assert_eq!(std::fs::read_to_string(&expected).unwrap(), "hello");
    assert_eq!(*share.shared.borrow(), vec![expected]);
}

#[test]
fn browser_and_native_paths_produce_identical_bytes() {
    let title = "Redação final";
    let text = "Linha 1\nLinha 2 — ção\n";

    let download = RecordingDownload::default();
    ExportService::browser(download.clone())
        .try_export(title, text)
        .unwrap();
    let seen = download.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].mime, EXPORT_MIME);
    assert_eq!(seen[0].file.file_name, "Redação final.txt");

    let dir = tempfile::tempdir().unwrap();
    ExportService::native(dir.path(), RecordingShare::default())
        .try_export(title, text)
        .unwrap();
    let on_disk = std::fs::read(dir.path().join("Redação final.txt")).unwrap();

    assert_eq!(seen[0].file.contents, on_disk);
    assert_eq!(on_disk, text.as_bytes());
}

#[test]
fn export_success_shows_confirmation() {
    let notice = ExportService::browser(RecordingDownload::default()).export("T", "hello");
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, EXPORT_SUCCESS_TITLE);
    assert_eq!(notice.message, EXPORT_SUCCESS_MESSAGE);
}

#[test]
fn share_failure_becomes_error_notice() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExportService::native(dir.path(), BrokenShare);

    let err = service.try_export("T", "hello").unwrap_err();
    assert!(matches!(err, ExportError::Share(_)));

    let notice = service.export("T", "hello");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Não foi possível baixar o arquivo.");
}

#[test]
fn write_failure_becomes_error_notice() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").unwrap();
    let service = ExportService::native(&blocker, RecordingShare::default());

    let err = service.try_export("T", "hello").unwrap_err();
    assert!(matches!(err, ExportError::Write { .. }));
    assert!(service.export("T", "hello").is_error());
}

#[test]
fn path_like_title_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let service = ExportService::native(dir.path().join("docs"), RecordingShare::default());

    let err = service.try_export("../escape", "x").unwrap_err();
    assert!(matches!(err, ExportError::InvalidTitle(_)));
    assert!(!dir.path().join("escape.txt").exists());
}
