//! Essay export to a shareable text file.
//!
//! # Responsibility
//! - Build `{title}.txt` holding the essay text verbatim as UTF-8.
//! - Hand the file to the host: a download trigger in browser-style hosts, a
//!   documents-directory write plus share sheet in native hosts.
//!
//! # Invariants
//! - Both host paths use [`build_export_file`], so bytes are identical for
//!   the same `(title, text)`.
//! - Titles that would escape the documents directory are rejected before
//!   anything is written.
//! - `export` never panics; failures become an error notice.
//! - Titles are user content: error text and log events name the documents
//!   directory at most, never the file name.

use crate::error::{report_failure, FailureKind};
use crate::notice::UserNotice;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub const EXPORT_EXTENSION: &str = "txt";
pub const EXPORT_MIME: &str = "text/plain";
pub const EXPORT_SUCCESS_TITLE: &str = "Sucesso";
pub const EXPORT_SUCCESS_MESSAGE: &str = "Arquivo baixado com sucesso.";

pub type ExportResult<T> = Result<T, ExportError>;

/// File export failure.
#[derive(Debug)]
pub enum ExportError {
    /// Title cannot be used as a file name.
    InvalidTitle(String),
    /// Writing the file into `dir` failed.
    Write { dir: PathBuf, source: io::Error },
    /// The native share sheet could not be presented.
    Share(io::Error),
    /// The browser download could not be triggered.
    Download(io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(_) => write!(f, "title cannot be used as a file name"),
            Self::Write { dir, source } => {
                write!(f, "failed to write export file in `{}`: {source}", dir.display())
            }
            Self::Share(err) => write!(f, "failed to open share sheet: {err}"),
            Self::Download(err) => write!(f, "failed to trigger download: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTitle(_) => None,
            Self::Write { source, .. } => Some(source),
            Self::Share(err) | Self::Download(err) => Some(err),
        }
    }
}

/// File name plus content for one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// Downloadable object handed to a browser-style host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserDownload {
    pub file: ExportFile,
    pub mime: &'static str,
}

/// Browser-style save dialog.
pub trait DownloadTrigger {
    fn trigger(&self, download: &BrowserDownload) -> io::Result<()>;
}

/// Native share sheet for a file already on disk.
pub trait ShareSheet {
    fn share(&self, path: &Path) -> io::Result<()>;
}

/// Share sheet for hosts without one; the written file is the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShareSheet;

impl ShareSheet for NoShareSheet {
    fn share(&self, _path: &Path) -> io::Result<()> {
        info!("event=export_share module=export status=skipped");
        Ok(())
    }
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportReceipt {
    Downloaded { file_name: String },
    Shared { path: PathBuf },
}

enum ExportTarget {
    Browser(Box<dyn DownloadTrigger>),
    Native {
        documents_dir: PathBuf,
        share: Box<dyn ShareSheet>,
    },
}

/// Export service bound to one host environment.
pub struct ExportService {
    target: ExportTarget,
}

impl ExportService {
    /// Browser-style host: synthesize a download and trigger a save dialog.
    pub fn browser(trigger: impl DownloadTrigger + 'static) -> Self {
        Self {
            target: ExportTarget::Browser(Box::new(trigger)),
        }
    }

    /// Native host: write into `documents_dir`, then open the share sheet.
    pub fn native(documents_dir: impl Into<PathBuf>, share: impl ShareSheet + 'static) -> Self {
        Self {
            target: ExportTarget::Native {
                documents_dir: documents_dir.into(),
                share: Box::new(share),
            },
        }
    }

    /// Exports and reports typed failures.
    pub fn try_export(&self, title: &str, text: &str) -> ExportResult<ExportReceipt> {
        match &self.target {
            ExportTarget::Browser(trigger) => {
                let download = BrowserDownload {
                    file: build_export_file(title, text)?,
                    mime: EXPORT_MIME,
                };
                trigger.trigger(&download).map_err(ExportError::Download)?;
                Ok(ExportReceipt::Downloaded {
                    file_name: download.file.file_name,
                })
            }
            ExportTarget::Native {
                documents_dir,
                share,
            } => {
                let path = write_export_file(documents_dir, title, text)?;
                share.share(&path).map_err(ExportError::Share)?;
                Ok(ExportReceipt::Shared { path })
            }
        }
    }

    /// Exports and converts the outcome into a notice for the user.
    pub fn export(&self, title: &str, text: &str) -> UserNotice {
        match self.try_export(title, text) {
            Ok(_) => {
                info!(
                    "event=essay_export module=export status=ok bytes={}",
                    text.len()
                );
                UserNotice::info(EXPORT_SUCCESS_TITLE, EXPORT_SUCCESS_MESSAGE)
            }
            Err(err) => report_failure(FailureKind::FileExport, "export", "essay_export", &err),
        }
    }
}

/// Builds the export file for `(title, text)`.
pub fn build_export_file(title: &str, text: &str) -> ExportResult<ExportFile> {
    Ok(ExportFile {
        file_name: export_file_name(title)?,
        contents: text.as_bytes().to_vec(),
    })
}

/// Writes the export file into `dir` and returns its path.
pub fn write_export_file(dir: &Path, title: &str, text: &str) -> ExportResult<PathBuf> {
    let file = build_export_file(title, text)?;
    let path = dir.join(&file.file_name);
    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, &file.contents))
        .map_err(|source| ExportError::Write {
            dir: dir.to_path_buf(),
            source,
        })?;
    Ok(path)
}

/// `{title}.txt`, rejecting titles that are not a single path component.
pub fn export_file_name(title: &str) -> ExportResult<String> {
    let escapes = title.contains(['/', '\\', '\0']) || title == "." || title == "..";
    if escapes {
        return Err(ExportError::InvalidTitle(title.to_string()));
    }
    Ok(format!("{title}.{EXPORT_EXTENSION}"))
}
