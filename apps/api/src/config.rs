use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::Credentials;

const DEFAULT_SUPPORT_EMAIL: &str = "support@hirewise.ai";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Every LLM credential is optional: with none set the service still starts
/// and answers chat requests with the no-provider guidance message.
#[derive(Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub gemini_base_url: Option<String>,
    pub openai_base_url: Option<String>,
    pub llm_timeout: Duration,
    pub support_email: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_timeout_secs = match non_empty(lookup("LLM_TIMEOUT_SECS")) {
            Some(raw) => raw
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        if llm_timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            credentials: Credentials {
                gemini_api_key: lookup("GEMINI_API_KEY"),
                openai_api_key: lookup("OPENAI_API_KEY"),
            },
            gemini_base_url: non_empty(lookup("GEMINI_BASE_URL")),
            openai_base_url: non_empty(lookup("OPENAI_BASE_URL")),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            support_email: non_empty(lookup("SUPPORT_EMAIL"))
                .unwrap_or_else(|| DEFAULT_SUPPORT_EMAIL.to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

// Keys are secrets; keep them out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_timeout", &self.llm_timeout)
            .field("support_email", &self.support_email)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
