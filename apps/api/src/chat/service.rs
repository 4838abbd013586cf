//! Message dispatch. `AiService` owns the provider picked at startup and
//! bounds every call with a timeout.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::chat::fallback::{APOLOGY_MESSAGE, COULD_NOT_GENERATE_MESSAGE};
use crate::config::Config;
use crate::llm_client::{select_provider, ChatProvider, LlmError, ProviderSettings};

#[derive(Clone)]
pub struct AiService {
    provider: Arc<dyn ChatProvider>,
    timeout: Duration,
}

impl AiService {
    pub fn new(provider: Arc<dyn ChatProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Selects and builds the provider named by the configured credentials.
    /// `Ok(None)` means no credential is set.
    pub fn from_config(config: &Config) -> Result<Option<Self>, LlmError> {
        let Some(selected) = select_provider(&config.credentials) else {
            return Ok(None);
        };

        let settings = ProviderSettings {
            timeout: config.llm_timeout,
            gemini_base_url: config.gemini_base_url.clone(),
            openai_base_url: config.openai_base_url.clone(),
        };
        let provider = selected.build(&settings)?;

        Ok(Some(Self::new(provider, config.llm_timeout)))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// One bounded round trip to the provider. A blank reply counts as a failure.
    pub async fn complete(&self, message: &str, context: Option<&str>) -> Result<String, LlmError> {
        let reply = tokio::time::timeout(self.timeout, self.provider.send(message, context))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        if reply.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            provider = self.provider.name(),
            "LLM call returned {} chars",
            reply.len()
        );
        Ok(reply)
    }

    /// Like `complete`, but never fails: errors are logged and replaced by a
    /// fixed message.
    pub async fn chat(&self, message: &str, context: Option<&str>) -> String {
        match self.complete(message, context).await {
            Ok(reply) => reply,
            Err(LlmError::NoChoices) => {
                warn!(provider = self.provider.name(), "Chat reply had no choices");
                COULD_NOT_GENERATE_MESSAGE.to_string()
            }
            Err(e) => {
                error!(provider = self.provider.name(), "Chat dispatch failed: {e}");
                APOLOGY_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::test_support::{service, StubProvider};

    #[tokio::test]
    async fn test_chat_returns_provider_reply() {
        let ai = service(StubProvider::Reply("Hello from the stub".into()));
        assert_eq!(ai.chat("hello", None).await, "Hello from the stub");
    }

    #[tokio::test]
    async fn test_chat_network_failure_returns_apology() {
        let ai = service(StubProvider::Fail);
        assert_eq!(ai.chat("hello", None).await, APOLOGY_MESSAGE);
    }

    #[tokio::test]
    async fn test_chat_malformed_json_reply_passes_through() {
        let ai = service(StubProvider::Reply("{\"score\": oops".into()));
        let reply = ai.chat("hello", None).await;
        assert_eq!(reply, "{\"score\": oops");
    }

    #[tokio::test]
    async fn test_chat_never_returns_empty() {
        for stub in [
            StubProvider::Reply("normal".into()),
            StubProvider::Reply("{broken json".into()),
            StubProvider::Reply("   ".into()),
            StubProvider::Fail,
        ] {
            let reply = service(stub).chat("hello", None).await;
            assert!(!reply.trim().is_empty());
        }
    }

    #[tokio::test]
    async fn test_chat_no_choices_returns_could_not_generate() {
        let ai = service(StubProvider::NoChoices);
        assert_eq!(ai.chat("hello", None).await, COULD_NOT_GENERATE_MESSAGE);
        assert!(matches!(
            ai.complete("hello", None).await.unwrap_err(),
            LlmError::NoChoices
        ));
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_content() {
        let ai = service(StubProvider::Reply("\n\n".into()));
        let err = ai.complete("hello", None).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_provider_times_out_with_apology() {
        let ai = AiService::new(
            Arc::new(StubProvider::Hang(Duration::from_secs(600))),
            Duration::from_secs(30),
        );

        let err = ai.complete("hello", None).await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout(d) if d == Duration::from_secs(30)));

        assert_eq!(
            ai.chat("hello", None).await,
            "Sorry, I am having trouble connecting right now. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_chat_is_idempotent_against_deterministic_stub() {
        let ai = service(StubProvider::Echo);
        let first = ai.chat("same input", Some("same context")).await;
        let second = ai.chat("same input", Some("same context")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_context_reaches_provider() {
        let ai = service(StubProvider::Echo);
        let reply = ai.chat("question", Some("guidance")).await;
        assert_eq!(reply, "guidance|question");
    }

    #[test]
    fn test_from_config_without_credentials_is_none() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(AiService::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_picks_openai_when_gemini_blank() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some(String::new()),
            "OPENAI_API_KEY" => Some("valid-key".to_string()),
            _ => None,
        })
        .unwrap();
        let ai = AiService::from_config(&config).unwrap().unwrap();
        assert_eq!(ai.provider_name(), "openai");
        assert_eq!(ai.model(), "gpt-3.5-turbo");
    }
}
