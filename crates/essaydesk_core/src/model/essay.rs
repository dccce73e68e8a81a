//! Essay record model.
//!
//! # Invariants
//! - `id` is non-blank and unique within the persisted collection.
//! - `title` and `text` may be empty; display placeholders cover that case.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable essay identifier.
pub type EssayId = String;

/// Placeholder shown for an essay without a title.
pub const UNTITLED_PLACEHOLDER: &str = "Sem título";
/// Placeholder shown for an essay without body text.
pub const EMPTY_TEXT_PLACEHOLDER: &str = "Sem conteúdo disponível.";

/// One saved essay.
///
/// Serialized with the field names the device store already holds
/// (`{id, titulo, texto}`), so existing collections load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayRecord {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: EssayId,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "texto", default)]
    pub text: String,
}

/// Validation errors for essay records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EssayValidationError {
    BlankId,
}

impl Display for EssayValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "essay id must not be blank"),
        }
    }
}

impl Error for EssayValidationError {}

impl EssayRecord {
    /// Creates an essay with a freshly generated id.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            text: text.into(),
        }
    }

    /// Creates an essay with an id chosen by the creating screen.
    pub fn with_id(
        id: impl Into<EssayId>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, EssayValidationError> {
        let record = Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), EssayValidationError> {
        if self.id.trim().is_empty() {
            return Err(EssayValidationError::BlankId);
        }
        Ok(())
    }

    /// Title to render, falling back to the untitled placeholder.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_PLACEHOLDER
        } else {
            self.title.as_str()
        }
    }

    /// Body to render, falling back to the empty-text placeholder.
    pub fn display_text(&self) -> &str {
        if self.text.trim().is_empty() {
            EMPTY_TEXT_PLACEHOLDER
        } else {
            self.text.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_distinct_non_blank_ids() {
        let first = EssayRecord::new("a", "b");
        let second = EssayRecord::new("a", "b");
        assert!(first.validate().is_ok());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn with_id_rejects_blank_id() {
        let err = EssayRecord::with_id("  ", "t", "x").unwrap_err();
        assert_eq!(err, EssayValidationError::BlankId);
    }

    #[test]
    fn placeholders_cover_blank_fields() {
        let record = EssayRecord::with_id("1", " ", "").unwrap();
        assert_eq!(record.display_title(), UNTITLED_PLACEHOLDER);
        assert_eq!(record.display_text(), EMPTY_TEXT_PLACEHOLDER);
    }
}
