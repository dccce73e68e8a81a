//! Writing template model, as served by the backend `GET /modelos`.

use serde::{Deserialize, Serialize};

/// Read-only template snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "imagem", default)]
    pub image_url: String,
    #[serde(rename = "corpo_redacao", default)]
    pub body_text: String,
}
