//! Screen lifecycle hooks and late-result guarding.
//!
//! # Responsibility
//! - Make "on becoming visible, reload authoritative state" an explicit hook.
//! - Let async work started on a screen detect that the screen was left.
//!
//! # Invariants
//! - A token is accepted only while the screen is visible and no blur has
//!   happened since the token was issued.

/// Lifecycle contract implemented by screen presenters.
pub trait ScreenLifecycle {
    /// Called every time the screen becomes visible, including the first mount.
    fn on_focus(&mut self);
    /// Called when the screen stops being visible.
    fn on_blur(&mut self);
}

/// Identifies the visibility epoch a piece of async work was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessToken {
    epoch: u64,
}

/// Visibility tracker owned by one screen presenter.
#[derive(Debug, Default)]
pub struct Liveness {
    epoch: u64,
    visible: bool,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_visible(&mut self) {
        self.visible = true;
    }

    /// Marks the screen hidden and invalidates every outstanding token.
    pub fn mark_hidden(&mut self) {
        self.visible = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn token(&self) -> LivenessToken {
        LivenessToken { epoch: self.epoch }
    }

    pub fn accepts(&self, token: LivenessToken) -> bool {
        self.visible && token.epoch == self.epoch
    }
}
