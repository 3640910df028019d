use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::google::GoogleTranslator;
use super::language::LanguageTag;

/// One translated request element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Source language detected by the service, if reported.
    pub source_language: Option<String>,
    /// Model that produced the translation, if reported.
    pub model: Option<String>,
}

impl Translation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: None,
            model: None,
        }
    }
}

/// Failure of a single remote translation call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("sent {expected} line(s) but received {received} translation(s)")]
    CountMismatch { expected: usize, received: usize },
}

impl RemoteError {
    /// Whether a later attempt may succeed (network trouble, quota, server errors).
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::CountMismatch { .. } => false,
        }
    }
}

/// A remote translation service.
///
/// Implementations translate every element of `lines` into `target` and
/// return exactly one [`Translation`] per element, in request order.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Short provider name used in status output.
    fn name(&self) -> &str;

    async fn translate(
        &self,
        lines: &[String],
        target: &LanguageTag,
    ) -> Result<Vec<Translation>, RemoteError>;
}

/// Supported translation back ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Google,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
        }
    }
}

/// Everything needed to construct a [`Translator`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub name: String,
    pub kind: ProviderKind,
    pub endpoint: String,
    pub api_key: String,
    /// Optional model hint (e.g. `nmt`).
    pub model: Option<String>,
}

/// Builds the translator for the configured provider.
pub fn build_translator(settings: &ProviderSettings) -> Box<dyn Translator> {
    match settings.kind {
        ProviderKind::Google => Box::new(GoogleTranslator::new(
            settings.name.clone(),
            settings.endpoint.clone(),
            settings.api_key.clone(),
            settings.model.clone(),
        )),
    }
}
