//! Navigation requests handed to the UI shell.
//!
//! Screens exchange plain string-keyed parameter maps; the key names match
//! what the existing screens read (`titulo`, `texto`, `modeloTexto`, ...).

use std::collections::BTreeMap;

pub const PARAM_ID: &str = "id";
pub const PARAM_TITLE: &str = "titulo";
pub const PARAM_TEXT: &str = "texto";
pub const PARAM_TEMPLATE_TEXT: &str = "modeloTexto";
pub const PARAM_TEMPLATE_TITLE: &str = "modeloTitulo";

/// Destination screens reachable from this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Read-only essay detail.
    EssayDetail,
    /// Editor seeded from a template.
    TemplateEditor,
    /// Editor starting from an empty page.
    BlankEditor,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::EssayDetail => "/visualizacao",
            Self::TemplateEditor => "/editmodelo",
            Self::BlankEditor => "/criarredacao",
        }
    }
}

/// A request to push `route` with `params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub route: Route,
    pub params: BTreeMap<String, String>,
}

impl NavigationRequest {
    pub fn to(route: Route) -> Self {
        Self {
            route,
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
