//! Domain model for essays and writing templates.
//!
//! # Responsibility
//! - Define the records shared by storage, presenters and the backend client.
//! - Map the externally authored wire field names (`titulo`, `texto`,
//!   `imagem`, `corpo_redacao`) onto normalized Rust field names.
//!
//! # Invariants
//! - Every essay is identified by a stable, non-blank string id.
//! - Template records are read-only snapshots of backend data.

pub mod essay;
pub mod template;

use serde::{Deserialize, Deserializer};

/// Accepts an identifier encoded either as a JSON string or a JSON number.
///
/// Older clients and the template backend emit numeric ids; both shapes are
/// normalized to their decimal string form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(value) => value,
        RawId::Signed(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
        RawId::Float(value) => value.to_string(),
    })
}
