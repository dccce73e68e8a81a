//! Essay collection adapter.
//!
//! # Responsibility
//! - Load, append and remove essays stored as one JSON array under
//!   [`ESSAYS_KEY`].
//! - Fail soft on the list-load path; report typed errors everywhere else.
//!
//! # Invariants
//! - Persisted order is insertion order; this adapter never reorders.
//! - Ids are unique; `save` rejects an id already present.
//! - Removing an absent id is a successful no-op and performs no write.

use crate::error::{log_failure, FailureKind};
use crate::kv::{KeyValueStore, KvError};
use crate::model::essay::{EssayRecord, EssayValidationError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store key holding the serialized essay collection.
pub const ESSAYS_KEY: &str = "redacoes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Essay store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Store access failed while reading.
    Read(KvError),
    /// Persisted value is not a valid essay array.
    Decode(serde_json::Error),
    /// Store access failed while writing.
    Write(KvError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Record failed validation before persistence.
    Validation(EssayValidationError),
    /// Another record already uses this id.
    DuplicateId(String),
}

impl StoreError {
    /// Classifies this error into the user-facing taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Read(_) | Self::Decode(_) => FailureKind::StorageRead,
            Self::Write(_) | Self::Encode(_) | Self::Validation(_) | Self::DuplicateId(_) => {
                FailureKind::StorageWrite
            }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read essays: {err}"),
            Self::Decode(err) => write!(f, "stored essays are unreadable: {err}"),
            Self::Write(err) => write!(f, "failed to write essays: {err}"),
            Self::Encode(err) => write!(f, "failed to serialize essays: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "essay id already exists: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<EssayValidationError> for StoreError {
    fn from(value: EssayValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Adapter exposing the essay collection contract over a key-value store.
pub struct EssayStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> EssayStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Loads every essay in persisted order, never failing.
    ///
    /// Read and decode failures are logged and yield an empty list.
    pub fn load_all(&self) -> Vec<EssayRecord> {
        match self.try_load_all() {
            Ok(essays) => essays,
            Err(err) => {
                log_failure(err.kind(), "essay_store", "essays_load", &err);
                Vec::new()
            }
        }
    }

    /// Loads every essay in persisted order, reporting failures.
    pub fn try_load_all(&self) -> StoreResult<Vec<EssayRecord>> {
        let raw = self.kv.get_item(ESSAYS_KEY).map_err(StoreError::Read)?;
        let essays = match raw {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str::<Vec<EssayRecord>>(&json).map_err(StoreError::Decode)?
            }
            _ => Vec::new(),
        };
        debug!(
            "event=essays_load module=essay_store status=ok count={}",
            essays.len()
        );
        Ok(essays)
    }

    /// Finds one essay by id.
    pub fn get(&self, id: &str) -> StoreResult<Option<EssayRecord>> {
        Ok(self
            .try_load_all()?
            .into_iter()
            .find(|essay| essay.id == id))
    }

    /// Appends `record` to the collection.
    pub fn save(&self, record: &EssayRecord) -> StoreResult<()> {
        record.validate()?;
        let mut essays = self.try_load_all()?;
        if essays.iter().any(|essay| essay.id == record.id) {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }
        essays.push(record.clone());
        self.write_all(&essays)?;
        info!(
            "event=essay_save module=essay_store status=ok id={} count={}",
            record.id,
            essays.len()
        );
        Ok(())
    }

    /// Removes the essay with `id`.
    ///
    /// Returns whether a record was removed.
    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        let essays = self.try_load_all()?;
        let before = essays.len();
        let remaining = without_id(essays, id);
        if remaining.len() == before {
            debug!("event=essay_remove module=essay_store status=noop id={id}");
            return Ok(false);
        }
        self.write_all(&remaining)?;
        info!(
            "event=essay_remove module=essay_store status=ok id={id} count={}",
            remaining.len()
        );
        Ok(true)
    }

    fn write_all(&self, essays: &[EssayRecord]) -> StoreResult<()> {
        let json = serde_json::to_string(essays).map_err(StoreError::Encode)?;
        self.kv
            .set_item(ESSAYS_KEY, &json)
            .map_err(StoreError::Write)
    }
}

/// Drops every record matching `id`, keeping the others in order.
pub fn without_id(essays: Vec<EssayRecord>, id: &str) -> Vec<EssayRecord> {
    essays.into_iter().filter(|essay| essay.id != id).collect()
}

#[cfg(test)]
mod tests {
    use super::{without_id, EssayStore, StoreError, ESSAYS_KEY};
    use crate::kv::{KeyValueStore, MemoryKvStore};
    use crate::model::essay::EssayRecord;

    fn essay(id: &str) -> EssayRecord {
        EssayRecord::with_id(id, format!("title {id}"), format!("text {id}")).unwrap()
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = EssayStore::new(MemoryKvStore::new());
        assert!(store.try_load_all().unwrap().is_empty());
    }

    #[test]
    fn legacy_numeric_ids_and_missing_fields_load() {
        let kv = MemoryKvStore::with_item(ESSAYS_KEY, r#"[{"id": 17, "titulo": "A"}]"#);
        let store = EssayStore::new(kv);
        let essays = store.try_load_all().unwrap();
        assert_eq!(essays.len(), 1);
        assert_eq!(essays[0].id, "17");
        assert_eq!(essays[0].title, "A");
        assert_eq!(essays[0].text, "");
    }

    #[test]
    fn corrupted_value_fails_soft_on_load_all_but_blocks_save() {
        let kv = MemoryKvStore::with_item(ESSAYS_KEY, "{not json");
        let store = EssayStore::new(&kv);
        assert!(store.load_all().is_empty());

        let err = store.save(&essay("1")).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
        assert_eq!(kv.get_item(ESSAYS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn without_id_keeps_order_of_remaining() {
        let kept = without_id(vec![essay("1"), essay("2"), essay("3")], "2");
        let ids: Vec<_> = kept.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
