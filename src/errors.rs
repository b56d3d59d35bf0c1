use serde::{Deserialize, Serialize};

/// A page that could not be produced, with enough context for the debug page.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DetailedError {
    pub message: String,
    pub error_source: Option<ErrorSource>,
    pub route: Option<String>,
}

impl DetailedError {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error_source: Some(ErrorSource::Internal(message.clone())),
            message,
            route: None,
        }
    }
}

impl From<minijinja::Error> for DetailedError {
    fn from(err: minijinja::Error) -> Self {
        let name = err.name().unwrap_or("<unknown>").to_string();
        let info = TemplateInfo {
            source_code: crate::templates::template_source(&name).map(str::to_string),
            name,
            line: err.line().unwrap_or(0),
            detail: err.detail().map(str::to_string).unwrap_or_else(|| err.kind().to_string()),
        };
        Self {
            message: err.to_string(),
            error_source: Some(ErrorSource::Template(info)),
            route: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum ErrorSource {
    Template(TemplateInfo),
    /// Actor mailbox failures, timeouts and other plumbing problems.
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TemplateInfo {
    pub name: String,
    pub line: usize,
    pub source_code: Option<String>,
    pub detail: String,
}

impl std::fmt::Display for DetailedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DetailedError {}
