//! Flutter-facing bindings for EssayDesk core.

pub mod api;
