//! LLM Client — provider selection and the provider implementations behind it.
//!
//! ARCHITECTURAL RULE: No other module may call a model vendor's HTTP API directly.
//! Everything above this module talks to a `ChatProvider`.
//!
//! Two vendors are supported. When both credentials are present Gemini wins;
//! the choice is made once at startup and never revisited.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM response contained no choices")]
    NoChoices,

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to construct provider client: {0}")]
    Construction(String),
}

/// One model vendor. Implementations shape the request for their API and
/// return the reply text; they never substitute fallback content themselves.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short vendor name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;

    async fn send(&self, message: &str, context: Option<&str>) -> Result<String, LlmError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

/// Raw credentials as read from configuration. Blank values count as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &present(&self.gemini_api_key).map(|_| "<redacted>"))
            .field("openai_api_key", &present(&self.openai_api_key).map(|_| "<redacted>"))
            .finish()
    }
}

/// The selected vendor and its key.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Transport settings shared by both vendors.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub timeout: Duration,
    pub gemini_base_url: Option<String>,
    pub openai_base_url: Option<String>,
}

/// Picks the vendor to use from the available credentials.
/// Returns `None` when neither key is set.
pub fn select_provider(credentials: &Credentials) -> Option<ProviderConfig> {
    if let Some(key) = present(&credentials.gemini_api_key) {
        return Some(ProviderConfig {
            kind: ProviderKind::Gemini,
            api_key: key.to_string(),
        });
    }

    present(&credentials.openai_api_key).map(|key| ProviderConfig {
        kind: ProviderKind::OpenAi,
        api_key: key.to_string(),
    })
}

impl ProviderConfig {
    /// Eagerly constructs the provider client. Fails only if the underlying
    /// HTTP client cannot be built; key validity is discovered on first call.
    pub fn build(&self, settings: &ProviderSettings) -> Result<Arc<dyn ChatProvider>, LlmError> {
        let client = http_client(settings.timeout)?;

        let provider: Arc<dyn ChatProvider> = match self.kind {
            ProviderKind::Gemini => Arc::new(GeminiProvider::new(
                client,
                self.api_key.clone(),
                settings.gemini_base_url.clone(),
            )),
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                client,
                self.api_key.clone(),
                settings.openai_base_url.clone(),
            )),
        };

        Ok(provider)
    }
}

fn http_client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Construction(e.to_string()))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Both vendors wrap failures as `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct VendorError {
    error: VendorErrorBody,
}

#[derive(Debug, Deserialize)]
struct VendorErrorBody {
    message: String,
}

/// Converts a non-success response into `LlmError::Api`, preferring the
/// vendor's own error message over the raw body.
async fn api_error(response: reqwest::Response) -> LlmError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<VendorError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}
