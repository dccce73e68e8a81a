//! Screen-level use-case services.
//!
//! # Responsibility
//! - Turn storage and backend results into plain view models.
//! - Keep the UI shell free of storage, network and file-system details.
//!
//! # Invariants
//! - Service methods never panic and never leak raw errors to the shell;
//!   failures surface as `UserNotice`s.

pub mod argument;
pub mod essay_list;
pub mod export;
pub mod grid;
pub mod template_picker;
