//! Remote backend access.
//!
//! # Responsibility
//! - Speak the template listing and essay generation HTTP contracts.
//! - Validate response shapes before anything reaches a presenter.
//!
//! # Invariants
//! - Requests are issued once; nothing here retries.

pub mod backend;
