//! Persistence adapters over the device key-value store.
//!
//! # Responsibility
//! - Own storage keys and serialization formats.
//! - Give screens narrow load/save/remove contracts instead of raw store access.
//!
//! # Invariants
//! - Every mutation is read-modify-write of the whole collection.
//! - Unreadable persisted data is never overwritten by a write path.

pub mod essay_store;
