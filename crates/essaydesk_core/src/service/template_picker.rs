//! Template selection presenter.
//!
//! # Responsibility
//! - Fetch the template list once per mount.
//! - Lay templates out in a width-dependent number of columns.
//! - Forward a selected template to the editor without touching it.
//!
//! # Invariants
//! - A failed fetch leaves the list empty; there is no retry or fallback.
//! - Results arriving after the screen was left are discarded.

use crate::error::report_failure;
use crate::model::template::TemplateRecord;
use crate::nav::{NavigationRequest, Route, PARAM_TEMPLATE_TEXT, PARAM_TEMPLATE_TITLE};
use crate::notice::UserNotice;
use crate::remote::backend::{BackendResult, EssayBackend};
use crate::screen::{Liveness, LivenessToken, ScreenLifecycle};
use crate::service::grid::{chunk_rows, template_columns};
use log::{debug, info};

/// Card shown for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCard {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

impl From<&TemplateRecord> for TemplateCard {
    fn from(value: &TemplateRecord) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
            image_url: value.image_url.clone(),
        }
    }
}

/// Presenter for the "choose a template" screen.
#[derive(Debug, Default)]
pub struct TemplatePicker {
    templates: Vec<TemplateRecord>,
    notice: Option<UserNotice>,
    loading: bool,
    liveness: Liveness,
}

impl TemplatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts the screen and performs its single template fetch.
    pub async fn mount<B: EssayBackend>(&mut self, backend: &B) {
        self.on_focus();
        let token = self.begin_fetch();
        let result = backend.fetch_templates().await;
        self.apply_fetch(token, result);
    }

    /// Marks a fetch as started and returns the token to complete it with.
    pub fn begin_fetch(&mut self) -> LivenessToken {
        self.loading = true;
        self.notice = None;
        self.liveness.token()
    }

    /// Applies a fetch result; returns `false` when it arrived too late.
    pub fn apply_fetch(
        &mut self,
        token: LivenessToken,
        result: BackendResult<Vec<TemplateRecord>>,
    ) -> bool {
        if !self.liveness.accepts(token) {
            debug!("event=templates_fetch module=template_picker status=discarded");
            return false;
        }
        self.loading = false;
        match result {
            Ok(templates) => {
                info!(
                    "event=templates_fetch module=template_picker status=ok count={}",
                    templates.len()
                );
                self.templates = templates;
            }
            Err(err) => {
                self.templates.clear();
                self.notice = Some(report_failure(
                    err.kind(),
                    "template_picker",
                    "templates_fetch",
                    &err,
                ));
            }
        }
        true
    }

    pub fn templates(&self) -> &[TemplateRecord] {
        &self.templates
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error notice from the last fetch, if it failed.
    pub fn notice(&self) -> Option<&UserNotice> {
        self.notice.as_ref()
    }

    /// Template cards in rows sized for `width`.
    pub fn layout(&self, width: f64) -> Vec<Vec<TemplateCard>> {
        let cards: Vec<TemplateCard> = self.templates.iter().map(TemplateCard::from).collect();
        chunk_rows(&cards, template_columns(width))
    }

    /// Navigation to the editor seeded with the template's title and body.
    pub fn select(&self, id: &str) -> Option<NavigationRequest> {
        let template = self.templates.iter().find(|t| t.id == id)?;
        Some(
            NavigationRequest::to(Route::TemplateEditor)
                .param(PARAM_TEMPLATE_TEXT, template.body_text.as_str())
                .param(PARAM_TEMPLATE_TITLE, template.title.as_str()),
        )
    }

    /// Navigation to an empty editor.
    pub fn start_blank(&self) -> NavigationRequest {
        NavigationRequest::to(Route::BlankEditor)
    }
}

impl ScreenLifecycle for TemplatePicker {
    fn on_focus(&mut self) {
        self.liveness.mark_visible();
    }

    fn on_blur(&mut self) {
        self.liveness.mark_hidden();
        self.loading = false;
    }
}
