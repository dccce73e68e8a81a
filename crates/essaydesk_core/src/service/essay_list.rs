//! Saved-essay list presenter.
//!
//! # Responsibility
//! - Reload the collection whenever the screen gains focus.
//! - Present essays newest first, two cards per row.
//! - Route open/delete/export actions through the store and export service.
//!
//! # Invariants
//! - Persisted order is never mutated by presentation.
//! - After a successful delete the list is reloaded from storage, not
//!   patched in memory.
//! - A failed delete leaves the presented list untouched.

use crate::error::{report_failure, FailureKind, ERROR_NOTICE_TITLE};
use crate::kv::KeyValueStore;
use crate::model::essay::EssayRecord;
use crate::nav::{NavigationRequest, Route, PARAM_ID, PARAM_TEXT, PARAM_TITLE};
use crate::notice::UserNotice;
use crate::repo::essay_store::EssayStore;
use crate::screen::ScreenLifecycle;
use crate::service::export::ExportService;
use crate::service::grid::{chunk_rows, newest_first, ESSAY_GRID_COLUMNS};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Message shown instead of the grid when nothing is saved.
pub const EMPTY_LIST_MESSAGE: &str = "Nenhuma redação salva.";
pub const DELETED_TITLE: &str = "Excluído";
pub const DELETED_MESSAGE: &str = "Sua redação foi removida com sucesso!";

const CARD_SUMMARY_MAX_CHARS: usize = 120;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Summary card for one essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayCard {
    pub id: String,
    /// Title or the untitled placeholder.
    pub title: String,
    /// Collapsed, length-capped text or the empty-text placeholder.
    pub summary: String,
}

impl EssayCard {
    pub fn from_record(record: &EssayRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.display_title().to_string(),
            summary: card_summary(record.display_text()),
        }
    }
}

/// One grid row; `right` is empty when the row holds the odd last essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayRow {
    pub left: EssayCard,
    pub right: Option<EssayCard>,
}

/// Render model of the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EssayListView {
    Empty { message: &'static str },
    Grid { rows: Vec<EssayRow> },
}

/// Presenter for the saved-essay screen.
pub struct EssayListPresenter<S: KeyValueStore> {
    store: EssayStore<S>,
    essays: Vec<EssayRecord>,
}

impl<S: KeyValueStore> EssayListPresenter<S> {
    pub fn new(store: EssayStore<S>) -> Self {
        Self {
            store,
            essays: Vec::new(),
        }
    }

    /// Replaces the presented list with a fresh load, newest first.
    pub fn reload(&mut self) {
        self.essays = newest_first(&self.store.load_all());
    }

    /// Presented essays, newest first.
    pub fn essays(&self) -> &[EssayRecord] {
        &self.essays
    }

    pub fn view(&self) -> EssayListView {
        if self.essays.is_empty() {
            return EssayListView::Empty {
                message: EMPTY_LIST_MESSAGE,
            };
        }

        let cards: Vec<EssayCard> = self.essays.iter().map(EssayCard::from_record).collect();
        let rows = chunk_rows(&cards, ESSAY_GRID_COLUMNS)
            .into_iter()
            .filter_map(|row| {
                let mut slots = row.into_iter();
                let left = slots.next()?;
                Some(EssayRow {
                    left,
                    right: slots.next(),
                })
            })
            .collect();
        EssayListView::Grid { rows }
    }

    /// Navigation to the detail screen for a presented essay.
    ///
    /// The detail screen receives everything it shows; nothing is reloaded.
    pub fn open(&self, id: &str) -> Option<NavigationRequest> {
        let essay = self.find(id)?;
        Some(
            NavigationRequest::to(Route::EssayDetail)
                .param(PARAM_ID, essay.id.as_str())
                .param(PARAM_TITLE, essay.title.as_str())
                .param(PARAM_TEXT, essay.text.as_str()),
        )
    }

    /// Deletes one essay and reloads the list on success.
    pub fn delete(&mut self, id: &str) -> UserNotice {
        match self.store.remove(id) {
            Ok(_) => {
                self.reload();
                UserNotice::info(DELETED_TITLE, DELETED_MESSAGE)
            }
            Err(err) => report_failure(err.kind(), "essay_list", "essay_delete", &err),
        }
    }

    /// Exports a presented essay through `exporter`.
    pub fn export(&self, id: &str, exporter: &ExportService) -> UserNotice {
        match self.find(id) {
            Some(essay) => exporter.export(&essay.title, &essay.text),
            None => {
                warn!("event=essay_export module=essay_list status=error error_code=not_listed id={id}");
                UserNotice::error(ERROR_NOTICE_TITLE, FailureKind::FileExport.user_message())
            }
        }
    }

    fn find(&self, id: &str) -> Option<&EssayRecord> {
        self.essays.iter().find(|essay| essay.id == id)
    }
}

impl<S: KeyValueStore> ScreenLifecycle for EssayListPresenter<S> {
    fn on_focus(&mut self) {
        self.reload();
    }

    // Nothing runs in the background on this screen.
    fn on_blur(&mut self) {}
}

/// Collapses whitespace and caps the card summary length.
pub fn card_summary(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");
    let mut summary: String = collapsed.chars().take(CARD_SUMMARY_MAX_CHARS).collect();
    if collapsed.chars().count() > CARD_SUMMARY_MAX_CHARS {
        summary.push_str("...");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::card_summary;

    #[test]
    fn summary_collapses_whitespace() {
        assert_eq!(card_summary("  a\n\n b\tc "), "a b c");
    }

    #[test]
    fn summary_is_capped() {
        let long = "x".repeat(300);
        let summary = card_summary(&long);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 123);
    }
}
