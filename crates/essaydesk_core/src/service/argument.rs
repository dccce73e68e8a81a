//! Argument generation presenter.
//!
//! # Responsibility
//! - Validate the theme and send one generation request at a time.
//! - Show the generated essay, or a fixed error text when generation fails.
//!
//! # Invariants
//! - The trigger is disabled while a request is in flight.
//! - A failure never leaves the screen in an error state; the response area
//!   shows [`GENERATION_FAILED_TEXT`] and the user may try again.
//! - Results arriving after the screen was left are discarded.

use crate::error::{log_failure, ERROR_NOTICE_TITLE};
use crate::notice::UserNotice;
use crate::remote::backend::{BackendResult, EssayBackend};
use crate::screen::{Liveness, LivenessToken, ScreenLifecycle};
use log::{debug, info};

pub const GENERATION_FAILED_TEXT: &str = "Erro ao gerar redação. Tente novamente.";
pub const EMPTY_THEME_MESSAGE: &str = "Por favor, insira um tema.";
pub const TRIGGER_LABEL_IDLE: &str = "Gerar Redação";
pub const TRIGGER_LABEL_BUSY: &str = "Gerando...";

/// Why a submit did not start a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Theme was blank; show the notice.
    EmptyTheme(UserNotice),
    /// A request is already in flight.
    Busy,
}

/// An in-flight generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    theme: String,
    token: LivenessToken,
}

impl GenerationTicket {
    pub fn theme(&self) -> &str {
        &self.theme
    }
}

/// Presenter for the argument generation screen.
#[derive(Debug, Default)]
pub struct ArgumentComposer {
    theme: String,
    response: String,
    in_flight: bool,
    liveness: Liveness,
}

impl ArgumentComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Generated essay, the failure text, or empty before the first result.
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_trigger_enabled(&self) -> bool {
        !self.in_flight
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.in_flight {
            TRIGGER_LABEL_BUSY
        } else {
            TRIGGER_LABEL_IDLE
        }
    }

    /// Validates the theme and marks a request as in flight.
    pub fn begin(&mut self) -> Result<GenerationTicket, SubmitRejected> {
        if self.in_flight {
            return Err(SubmitRejected::Busy);
        }
        let theme = self.theme.trim();
        if theme.is_empty() {
            return Err(SubmitRejected::EmptyTheme(UserNotice::error(
                ERROR_NOTICE_TITLE,
                EMPTY_THEME_MESSAGE,
            )));
        }
        self.in_flight = true;
        Ok(GenerationTicket {
            theme: theme.to_string(),
            token: self.liveness.token(),
        })
    }

    /// Finishes a request; returns `false` when the result was discarded.
    pub fn complete(&mut self, ticket: GenerationTicket, result: BackendResult<String>) -> bool {
        self.in_flight = false;
        if !self.liveness.accepts(ticket.token) {
            debug!("event=argument_generate module=argument status=discarded");
            return false;
        }
        match result {
            Ok(essay) => {
                info!(
                    "event=argument_generate module=argument status=ok chars={}",
                    essay.chars().count()
                );
                self.response = essay;
            }
            Err(err) => {
                log_failure(err.kind(), "argument", "argument_generate", &err);
                self.response = GENERATION_FAILED_TEXT.to_string();
            }
        }
        true
    }

    /// Runs one full generation round trip against `backend`.
    pub async fn submit<B: EssayBackend>(&mut self, backend: &B) -> Result<(), SubmitRejected> {
        let ticket = self.begin()?;
        let result = backend.generate_argument(ticket.theme()).await;
        self.complete(ticket, result);
        Ok(())
    }
}

impl ScreenLifecycle for ArgumentComposer {
    fn on_focus(&mut self) {
        self.liveness.mark_visible();
    }

    fn on_blur(&mut self) {
        self.liveness.mark_hidden();
    }
}
