//! HTTP client for the template and generation backend.
//!
//! Endpoints:
//! - `GET /modelos` -> JSON array of `{id, titulo, imagem, corpo_redacao}`
//! - `POST /argumento` with `{"tema": ...}` -> generated essay text

use crate::config::{normalize_base_url, CoreConfig};
use crate::error::FailureKind;
use crate::model::template::TemplateRecord;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

const MAX_ERROR_BODY_CHARS: usize = 200;

pub type BackendResult<T> = Result<T, BackendError>;

/// Backend call failure. Every variant is a network failure to the user.
#[derive(Debug)]
pub enum BackendError {
    /// Connection, timeout or body transfer failure.
    Transport(reqwest::Error),
    /// Non-success HTTP status.
    Status { status: u16, body: String },
    /// Response body does not match the expected schema.
    InvalidResponse(String),
}

impl BackendError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::Network
    }
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "backend request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "backend returned status {status}: {body}")
            }
            Self::InvalidResponse(details) => write!(f, "invalid backend response: {details}"),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Backend operations used by the template picker and argument composer.
#[allow(async_fn_in_trait)]
pub trait EssayBackend {
    /// Lists writing templates.
    async fn fetch_templates(&self) -> BackendResult<Vec<TemplateRecord>>;
    /// Generates an argumentative essay for `theme`.
    async fn generate_argument(&self, theme: &str) -> BackendResult<String>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    tema: &'a str,
}

/// reqwest-backed backend client.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn from_config(config: &CoreConfig) -> BackendResult<Self> {
        Self::new(&config.backend_base_url, config.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl EssayBackend for BackendClient {
    async fn fetch_templates(&self) -> BackendResult<Vec<TemplateRecord>> {
        let started_at = Instant::now();
        let response = self.client.get(self.url("modelos")).send().await?;
        let (_, body) = read_success_body(response).await?;
        let templates: Vec<TemplateRecord> = serde_json::from_str(&body)
            .map_err(|err| BackendError::InvalidResponse(format!("template list: {err}")))?;
        info!(
            "event=templates_fetch module=backend status=ok count={} duration_ms={}",
            templates.len(),
            started_at.elapsed().as_millis()
        );
        Ok(templates)
    }

    async fn generate_argument(&self, theme: &str) -> BackendResult<String> {
        let started_at = Instant::now();
        let response = self
            .client
            .post(self.url("argumento"))
            .json(&GenerateRequest { tema: theme })
            .send()
            .await?;
        let (content_type, body) = read_success_body(response).await?;
        let essay = parse_generation_body(&content_type, &body)?;
        info!(
            "event=argument_generate module=backend status=ok chars={} duration_ms={}",
            essay.chars().count(),
            started_at.elapsed().as_millis()
        );
        Ok(essay)
    }
}

async fn read_success_body(response: reqwest::Response) -> BackendResult<(String, String)> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let body = response.text().await?;
    if !status.is_success() {
        debug!(
            "event=backend_call module=backend status=error http_status={}",
            status.as_u16()
        );
        return Err(BackendError::Status {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }
    Ok((content_type, body))
}

/// Validates a generation response body.
///
/// Accepted shapes: a JSON string (for JSON content types) or plain text.
/// Blank bodies and any other JSON value are rejected.
pub fn parse_generation_body(content_type: &str, body: &str) -> BackendResult<String> {
    if body.trim().is_empty() {
        return Err(BackendError::InvalidResponse(
            "generation response is empty".to_string(),
        ));
    }
    if !content_type.contains("json") {
        return Ok(body.to_string());
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|err| BackendError::InvalidResponse(format!("generation response: {err}")))?;
    match value {
        Value::String(text) if !text.trim().is_empty() => Ok(text),
        Value::String(_) => Err(BackendError::InvalidResponse(
            "generation response is empty".to_string(),
        )),
        other => Err(BackendError::InvalidResponse(format!(
            "expected a JSON string, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
