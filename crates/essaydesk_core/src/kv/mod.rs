//! Device key-value store contracts.
//!
//! # Responsibility
//! - Model the device's persistent string key-value store behind one trait.
//! - Keep storage backends swappable for the essay store adapter.
//!
//! # Invariants
//! - Values are opaque strings; serialization belongs to the callers.
//! - `set_item` replaces any previous value for the key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_kv;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use sqlite_kv::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Storage-access failure raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    /// SQLite backend failure.
    Db(DbError),
    /// Backend refused the operation (quota, platform error).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(details) => write!(f, "key-value store unavailable: {details}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> KvResult<()>;
    /// Removes `key`; removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> KvResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}
